use std::sync::Arc;

use folio_extern_contracts::relay::{RelayApiService, RelayMessage, RelayResponse};
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::read_response;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct FormspreeApiServiceImpl {
    config: FormspreeApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct FormspreeApiServiceConfig {
    pub endpoint: Arc<Url>,
}

impl FormspreeApiServiceImpl {
    pub fn new(config: FormspreeApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl RelayApiService for FormspreeApiServiceImpl {
    #[tracing::instrument(skip_all, fields(endpoint = %self.config.endpoint))]
    async fn send(&self, message: RelayMessage) -> anyhow::Result<RelayResponse> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&SubmitRequest::from(&message))
            .send()
            .await?;
        let response = read_response(response).await?;

        debug!(status = response.status, "formspree accepted message");
        Ok(response)
    }
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
    #[serde(rename = "_subject")]
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a RelayMessage> for SubmitRequest<'a> {
    fn from(value: &'a RelayMessage) -> Self {
        Self {
            name: &value.from_name,
            email: &value.from_email,
            reply_to: &value.reply_to,
            subject: &value.subject,
            message: &value.message,
        }
    }
}
