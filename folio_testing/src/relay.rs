use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

pub const EMAILJS_SEND_ROUTE: &str = "/api/v1.0/email/send";
pub const FORMSPREE_ROUTE: &str = "/f/:form_id";

/// Any message with this subject is rejected with a server error.
pub const REJECT_SUBJECT: &str = "reject";

/// In-memory stand-in for EmailJS and Formspree.
#[derive(Debug)]
pub struct FakeRelay {
    service_id: String,
    template_id: String,
    public_key: String,
    form_id: String,
    received: Mutex<Vec<ReceivedMessage>>,
}

/// A message accepted by the fake relay, normalized across both providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub subject: String,
    pub message: String,
}

impl FakeRelay {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
        form_id: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            form_id: form_id.into(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Messages accepted so far, oldest first.
    pub fn received(&self) -> Vec<ReceivedMessage> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, message: ReceivedMessage) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

pub fn router(fake: Arc<FakeRelay>) -> Router<()> {
    Router::new()
        .route(EMAILJS_SEND_ROUTE, routing::post(emailjs_send))
        .route(FORMSPREE_ROUTE, routing::post(formspree_submit))
        .with_state(fake)
}

pub async fn start_server(host: IpAddr, port: u16, fake: FakeRelay) -> anyhow::Result<()> {
    info!("Starting fake relay server on {host}:{port}");
    info!("EmailJS endpoint override: http://{host}:{port}");
    info!(
        "Formspree endpoint: http://{host}:{port}/f/{}",
        fake.form_id
    );
    info!("Messages with the subject {REJECT_SUBJECT:?} are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(fake.into()))
        .await
        .context("Failed to start HTTP server")
}

/// Binds the fake relay to an ephemeral local port and serves it in the
/// background.
pub async fn spawn(fake: FakeRelay) -> anyhow::Result<(SocketAddr, Arc<FakeRelay>)> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind fake relay")?;
    let addr = listener.local_addr()?;
    let fake = Arc::new(fake);
    let router = router(Arc::clone(&fake));
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok((addr, fake))
}

#[derive(Deserialize)]
struct EmailJsSendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: EmailJsTemplateParams,
}

#[derive(Deserialize)]
struct EmailJsTemplateParams {
    from_name: String,
    from_email: String,
    reply_to: String,
    subject: String,
    message: String,
}

async fn emailjs_send(
    fake: State<Arc<FakeRelay>>,
    Json(request): Json<EmailJsSendRequest>,
) -> Response {
    if request.user_id != fake.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid").into_response();
    }
    if request.service_id != fake.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid").into_response();
    }
    if request.template_id != fake.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID not found").into_response();
    }

    let params = request.template_params;
    if params.subject == REJECT_SUBJECT {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Relay rejected message").into_response();
    }

    fake.record(ReceivedMessage {
        from_name: params.from_name,
        from_email: params.from_email,
        reply_to: params.reply_to,
        subject: params.subject,
        message: params.message,
    });
    (StatusCode::OK, "OK").into_response()
}

#[derive(Deserialize)]
struct FormspreeSubmitRequest {
    name: String,
    email: String,
    #[serde(rename = "_replyto")]
    reply_to: String,
    #[serde(rename = "_subject")]
    subject: String,
    message: String,
}

#[derive(Serialize)]
struct FormspreeResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

async fn formspree_submit(
    fake: State<Arc<FakeRelay>>,
    Path(form_id): Path<String>,
    Json(request): Json<FormspreeSubmitRequest>,
) -> Response {
    if form_id != fake.form_id {
        let body = FormspreeResponse {
            ok: false,
            error: Some("Form not found"),
        };
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    if request.subject == REJECT_SUBJECT {
        let body = FormspreeResponse {
            ok: false,
            error: Some("Submission rejected"),
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
    }

    fake.record(ReceivedMessage {
        from_name: request.name,
        from_email: request.email,
        reply_to: request.reply_to,
        subject: request.subject,
        message: request.message,
    });
    Json(FormspreeResponse {
        ok: true,
        error: None,
    })
    .into_response()
}
