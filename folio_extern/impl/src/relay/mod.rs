use folio_extern_contracts::relay::{RelayApiService, RelayMessage, RelayResponse};

pub use self::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    formspree::{FormspreeApiServiceConfig, FormspreeApiServiceImpl},
};

mod emailjs;
mod formspree;

/// The relay selected in the configuration.
#[derive(Debug, Clone)]
pub enum RelayApiServiceImpl {
    EmailJs(EmailJsApiServiceImpl),
    Formspree(FormspreeApiServiceImpl),
}

impl RelayApiService for RelayApiServiceImpl {
    async fn send(&self, message: RelayMessage) -> anyhow::Result<RelayResponse> {
        match self {
            Self::EmailJs(relay) => relay.send(message).await,
            Self::Formspree(relay) => relay.send(message).await,
        }
    }
}

/// Turns a relay response into a [`RelayResponse`], treating every non-2xx
/// status as an error that carries the response body.
async fn read_response(response: reqwest::Response) -> anyhow::Result<RelayResponse> {
    let status = response.status();
    let text = response.text().await?;
    anyhow::ensure!(
        status.is_success(),
        "Relay responded with status {status}: {text}"
    );

    Ok(RelayResponse {
        status: status.as_u16(),
        text,
    })
}
