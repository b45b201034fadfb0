//! Thin JSON/HTTP front-end over a shared [`ChatSession`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::capabilities::ModelCapabilities;
use crate::config::WrapperConfig;
use crate::session::{ChatParams, ChatSession};

/// Shared application state. The session is created explicitly through
/// `/api/init` and passed by state, never a process-wide singleton.
pub struct AppState {
    pub config: WrapperConfig,
    pub session: Mutex<Option<ChatSession>>,
}

/// Build the router with an empty (uninitialized) session slot.
pub fn router(config: WrapperConfig) -> Router {
    let state = Arc::new(AppState {
        config,
        session: Mutex::new(None),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/init", post(init))
        .route("/api/models", get(models))
        .route("/api/chat", post(chat))
        .route("/api/switch_model", post(switch_model))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the front-end until the process exits.
pub async fn serve(addr: SocketAddr, config: WrapperConfig) -> std::io::Result<()> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "web front-end listening");
    axum::serve(listener, app).await
}

#[derive(Debug, Deserialize)]
pub struct InitRequest {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchBody {
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub success: bool,
    pub model: String,
    pub capabilities: CapabilitiesView,
}

#[derive(Debug, Serialize)]
pub struct CapabilitiesView {
    pub vision: bool,
    pub thinking: bool,
    pub streaming: bool,
}

impl From<&ModelCapabilities> for CapabilitiesView {
    fn from(caps: &ModelCapabilities) -> Self {
        Self {
            vision: caps.supports_vision,
            thinking: caps.supports_thinking,
            streaming: caps.supports_streaming,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn init(State(state): State<Arc<AppState>>, Json(req): Json<InitRequest>) -> Response {
    let base_url = req.base_url.unwrap_or_else(|| state.config.base_url.clone());
    let model = req.model.unwrap_or_else(|| state.config.default_model.clone());

    let session = ChatSession::connect(&base_url, &model, state.config.clone()).await;
    if !session.health_check().await {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot connect to LLM server");
    }

    let status = session_status(&session);
    *state.session.lock().await = Some(session);
    (StatusCode::OK, Json(status)).into_response()
}

async fn models(State(state): State<Arc<AppState>>) -> Response {
    let guard = state.session.lock().await;
    let Some(session) = guard.as_ref() else {
        return error_response(StatusCode::BAD_REQUEST, "session not initialized");
    };

    match session.list_models().await {
        Ok(models) => {
            (StatusCode::OK, Json(serde_json::json!({ "models": models }))).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn chat(State(state): State<Arc<AppState>>, Json(body): Json<ChatBody>) -> Response {
    let mut guard = state.session.lock().await;
    let Some(session) = guard.as_mut() else {
        return error_response(StatusCode::BAD_REQUEST, "session not initialized");
    };

    // buffered on purpose: the web UI renders complete messages
    let mut params = ChatParams::new(body.message).buffered();
    if let Some(system) = body.system_prompt {
        params = params.with_system_prompt(system);
    }

    match session.chat(params).await {
        Ok(result) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "response": result.text,
                "thinking": result.thinking,
            })),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn switch_model(State(state): State<Arc<AppState>>, Json(body): Json<SwitchBody>) -> Response {
    let mut guard = state.session.lock().await;
    let Some(session) = guard.as_mut() else {
        return error_response(StatusCode::BAD_REQUEST, "session not initialized");
    };

    session.switch_model(&body.model).await;
    let status = session_status(session);
    (StatusCode::OK, Json(status)).into_response()
}

fn session_status(session: &ChatSession) -> SessionStatus {
    let caps = session.capabilities();
    SessionStatus {
        success: true,
        model: if caps.model_name.is_empty() {
            session.model().to_string()
        } else {
            caps.model_name.clone()
        },
        capabilities: caps.into(),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
