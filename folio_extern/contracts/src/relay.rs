use std::future::Future;

use serde::Serialize;

/// Third-party transactional email service that delivers contact messages to
/// the site owner.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RelayApiService: Send + Sync + 'static {
    /// Sends one message through the relay. Any transport error or non-2xx
    /// response is an error.
    fn send(
        &self,
        message: RelayMessage,
    ) -> impl Future<Output = anyhow::Result<RelayResponse>> + Send;
}

/// Template parameters handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayMessage {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub text: String,
}

#[cfg(feature = "mock")]
impl MockRelayApiService {
    pub fn with_send(mut self, message: RelayMessage, result: Result<RelayResponse, String>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
