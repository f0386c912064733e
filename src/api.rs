//! HTTP API for the chat session

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::history::SessionHistory;
use crate::llm::LlmConfig;
use crate::pipeline::Pipeline;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider credential is configured
    pub pipeline: Option<Arc<Pipeline>>,
    pub history: Arc<Mutex<SessionHistory>>,
    pub settings: Arc<ChatSettings>,
}

/// Provider settings safe to expose to clients
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f32,
}

impl AppState {
    pub fn new(config: &LlmConfig) -> Self {
        let settings = ChatSettings {
            model: config.model.clone(),
            temperature: config.temperature,
        };

        let pipeline = match config.build_service() {
            Ok(service) => Some(Pipeline::new(service).with_max_tokens(config.max_tokens)),
            Err(e) => {
                tracing::warn!(error = %e, "LLM provider unavailable; chat requests will fail");
                None
            }
        };

        Self::with_pipeline(pipeline, settings)
    }

    pub fn with_pipeline(pipeline: Option<Pipeline>, settings: ChatSettings) -> Self {
        Self {
            pipeline: pipeline.map(Arc::new),
            history: Arc::new(Mutex::new(SessionHistory::new())),
            settings: Arc::new(settings),
        }
    }
}
