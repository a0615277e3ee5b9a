use std::sync::Arc;

use folio_extern_contracts::relay::{RelayApiService, RelayMessage, RelayResponse};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::read_response;
use crate::http::HttpClient;

const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
    service_id: Arc<str>,
    template_id: Arc<str>,
    public_key: Arc<str>,
    private_key: Option<Arc<str>>,
}

impl EmailJsApiServiceConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        service_id: &str,
        template_id: &str,
        public_key: &str,
        private_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => EMAILJS_ENDPOINT.parse()?,
        };

        Ok(Self {
            send_endpoint: endpoint.join(SEND_PATH)?.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            private_key: private_key.map(Into::into),
        })
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(config: EmailJsApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl RelayApiService for EmailJsApiServiceImpl {
    #[tracing::instrument(skip_all, fields(service_id = %self.config.service_id))]
    async fn send(&self, message: RelayMessage) -> anyhow::Result<RelayResponse> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: &message,
        };

        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await?;
        let response = read_response(response).await?;

        debug!(status = response.status, text = %response.text, "emailjs accepted message");
        Ok(response)
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a RelayMessage,
}
