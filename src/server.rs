//! Webhook HTTP server.

use crate::gateway::{Messenger, Translator};
use crate::router::CommandRouter;
use crate::security::{verify_webhook_secret, SECRET_TOKEN_HEADER};
use crate::telegram::Update;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub struct AppState<M, T> {
    router: Arc<CommandRouter<M, T>>,
    webhook_secret: Option<Arc<str>>,
}

impl<M, T> Clone for AppState<M, T> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            webhook_secret: self.webhook_secret.clone(),
        }
    }
}

/// Build the axum app: the webhook route plus `/health`.
pub fn app<M, T>(
    router: Arc<CommandRouter<M, T>>,
    webhook_path: &str,
    webhook_secret: Option<String>,
) -> Router
where
    M: Messenger + 'static,
    T: Translator + 'static,
{
    let state = AppState {
        router,
        webhook_secret: webhook_secret.map(Arc::from),
    };

    Router::new()
        .route(webhook_path, post(webhook::<M, T>))
        .route("/health", get(health_check::<M, T>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `0.0.0.0:{port}` until `shutdown` resolves.
pub async fn serve<F>(app: Router, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Webhook server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Webhook server failed")?;

    Ok(())
}

async fn health_check<M, T>(State(state): State<AppState<M, T>>) -> impl IntoResponse
where
    M: Messenger + 'static,
    T: Translator + 'static,
{
    (
        StatusCode::OK,
        format!("Bot running. Sessions: {}", state.router.sessions().len()),
    )
}

/// Telegram delivers each update here.
///
/// Once the secret checks out the update is always acknowledged with 200, even
/// when handling fails, so Telegram does not redeliver it.
async fn webhook<M, T>(
    State(state): State<AppState<M, T>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode
where
    M: Messenger + 'static,
    T: Translator + 'static,
{
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !verify_webhook_secret(state.webhook_secret.as_deref(), provided) {
        warn!("Rejected webhook call with missing or invalid secret token");
        return StatusCode::UNAUTHORIZED;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Failed to parse webhook update: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    let update_id = update.update_id;
    let Some(event) = update.into_event() else {
        debug!("Update {} carries no user message, skipping", update_id);
        return StatusCode::OK;
    };

    if let Err(e) = state.router.handle(event).await {
        error!("Failed to handle update {}: {:#}", update_id, e);
    }

    StatusCode::OK
}
