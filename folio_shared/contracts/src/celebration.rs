use folio_models::celebration::ConfettiBurst;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CelebrationService: Send + Sync + 'static {
    /// Launches the celebratory effect shown after a successful submission.
    /// Returns `None` if celebrations are disabled.
    fn celebrate(&self) -> Option<ConfettiBurst>;
}

#[cfg(feature = "mock")]
impl MockCelebrationService {
    pub fn with_celebrate(mut self) -> Self {
        self.expect_celebrate().once().return_const(None::<ConfettiBurst>);
        self
    }
}
