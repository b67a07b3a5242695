//! Local HTTP harness around the event handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::loader::TableLoader;
use crate::models::ErrorBody;
use crate::service::handle_event;

/// Shared state of the HTTP harness
#[derive(Debug, Clone)]
pub struct AppState {
    loader: Arc<TableLoader>,
}

impl AppState {
    #[must_use]
    pub fn new(loader: TableLoader) -> Self {
        Self {
            loader: Arc::new(loader),
        }
    }
}

/// Routes: `POST /mock-api` and `GET /health`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mock-api", post(mock_api))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, loader: TableLoader) -> Result<()> {
    let listener = TcpListener::bind((config.bind_host(), config.port)).await?;
    let addr = listener.local_addr()?;
    log::info!("Expected results API listening on http://{addr}/mock-api");
    axum::serve(listener, router(AppState::new(loader))).await?;
    Ok(())
}

/// Wrap the posted JSON as an event body and run it through the handler
pub async fn mock_api(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let request: Value = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return failure(format!("invalid JSON body: {e}")),
    };
    let event = json!({ "body": request.to_string() });

    let response = handle_event(&state.loader, &event).await;
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match serde_json::from_str::<Value>(&response.body) {
        Ok(body) => (status, Json(body)),
        Err(e) => failure(e),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn failure(error: impl ToString) -> (StatusCode, Json<Value>) {
    let body = serde_json::to_value(ErrorBody::new(error)).unwrap_or_else(|_| json!({}));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}
