use std::{ops::Deref, sync::LazyLock, time::Duration};

use folio_utils::folio_version;

/// Upper bound for a single relay round trip. A relay that does not answer
/// in time counts as unavailable.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "Folio Contact/{} (+{}; {})",
        folio_version(),
        env!("CARGO_PKG_HOMEPAGE"),
        env!("CARGO_PKG_REPOSITORY"),
    )
});

const _: () = assert!(
    !env!("CARGO_PKG_HOMEPAGE").is_empty() && !env!("CARGO_PKG_REPOSITORY").is_empty()
);

/// Shared client for all relay providers.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT.as_str())
            .timeout(timeout)
            .build()?;
        Ok(Self(client))
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
