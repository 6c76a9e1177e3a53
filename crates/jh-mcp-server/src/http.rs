//! HTTP transport: the same tool surface over a small axum API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use jh_history_tools::HistoryClient;

use crate::dispatch::{DispatchError, dispatch};
use crate::registry::ToolRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub client: Arc<dyn HistoryClient>,
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            DispatchError::UnknownTool(_) => StatusCode::NOT_FOUND,
            DispatchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        let body = json!({"error": self.to_string(), "status": status.as_u16()});
        (status, Json(body)).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    let tools: Vec<Value> = state
        .registry
        .list_tools()
        .into_iter()
        .map(|info| {
            json!({
                "name": info.name,
                "description": info.description,
                "inputSchema": info.schema,
            })
        })
        .collect();
    Json(json!({"tools": tools}))
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, DispatchError> {
    let args = body.map(|Json(v)| v).unwrap_or(json!({}));
    let text = dispatch(&state.registry, state.client.as_ref(), &name, args).await?;
    Ok(Json(json!({"tool": name, "result": text})))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(call_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "HTTP transport listening");
    axum::serve(listener, app).await?;
    Ok(())
}
