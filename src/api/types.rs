//! API request and response types

use crate::history::HistoryEntry;
use crate::pipeline::Sentiment;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Result of one pipeline run plus the updated session
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub sentiment: Sentiment,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// Non-secret provider settings
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub model: String,
    pub temperature: f32,
    /// False when no credential is configured
    pub ready: bool,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
