//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ConfigResponse, ErrorResponse, HistoryResponse, SuccessResponse,
};
use super::AppState;
use crate::llm::{LlmErrorKind, LlmMessage};
use crate::pipeline::PipelineError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(send_chat))
        .route("/api/history", get(get_history))
        .route("/api/history/clear", post(clear_history))
        .route("/api/config", get(get_config))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

/// Run one submission through the pipeline.
///
/// Each request gets a fresh pipeline state holding only the new message;
/// the session history is updated only when the run succeeds.
async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.text.is_empty() {
        return Err(AppError::BadRequest("Message text is required".to_string()));
    }

    let pipeline = state.pipeline.as_ref().ok_or_else(|| {
        AppError::Unavailable("No LLM provider configured. Set GROQ_API_KEY.".to_string())
    })?;

    let result = pipeline.run(vec![LlmMessage::user(req.text.clone())]).await?;

    let reply = result
        .reply()
        .ok_or_else(|| AppError::Internal("Pipeline finished without a reply".to_string()))?
        .to_string();
    let sentiment = result
        .sentiment
        .ok_or_else(|| AppError::Internal("Pipeline finished without a sentiment".to_string()))?;

    let mut history = state.history.lock().await;
    history.record_exchange(&req.text, &reply, sentiment);

    Ok(Json(ChatResponse {
        reply,
        sentiment,
        history: history.entries().to_vec(),
    }))
}

// ============================================================
// Session
// ============================================================

async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.lock().await;
    Json(HistoryResponse {
        history: history.entries().to_vec(),
    })
}

async fn clear_history(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.history.lock().await.clear();
    tracing::info!("Session history cleared");
    Json(SuccessResponse { success: true })
}

async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        model: state.settings.model.clone(),
        temperature: state.settings.temperature,
        ready: state.pipeline.is_some(),
    })
}

async fn get_version() -> &'static str {
    concat!("sentiment-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unavailable(String),
    /// The hosted provider failed
    Upstream(String),
    Internal(String),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyConversation | PipelineError::LastMessageNotUser => {
                AppError::BadRequest(err.to_string())
            }
            PipelineError::Llm(ref e) if e.kind == LlmErrorKind::Auth => {
                AppError::Unavailable(err.to_string())
            }
            PipelineError::Llm(_) => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::warn!(status = %status, error = %message, "Request failed");
        }

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
