use folio_models::notification::{
    Notification, NotificationEvent, NotificationId, NotificationKind,
};
use tokio::sync::broadcast;

/// Shows transient, dismissible messages that expire on their own.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Shows a notification and starts its auto-dismiss timer.
    fn present(&self, message: String, kind: NotificationKind) -> NotificationId;

    /// The close control of a notification. Returns `true` if this call
    /// removed it, `false` if it was already gone.
    fn dismiss(&self, id: NotificationId) -> bool;

    /// Notifications currently visible, oldest first.
    fn active(&self) -> Vec<Notification>;

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent>;
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_present(mut self, message: String, kind: NotificationKind) -> Self {
        self.expect_present()
            .once()
            .with(
                mockall::predicate::eq(message),
                mockall::predicate::eq(kind),
            )
            .return_once(|_, _| NotificationId::generate());
        self
    }
}
