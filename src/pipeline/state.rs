//! Pipeline state and input validation

use super::Sentiment;
use crate::llm::{LlmError, LlmMessage, MessageRole};
use serde::Serialize;
use thiserror::Error;

/// Record threaded through every stage of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    pub messages: Vec<LlmMessage>,
    /// Unset until the sentiment stage runs
    pub sentiment: Option<Sentiment>,
}

impl PipelineState {
    /// Validate the caller's message sequence.
    ///
    /// The sequence must end with the newly submitted user message.
    pub fn new(messages: Vec<LlmMessage>) -> Result<Self, PipelineError> {
        match messages.last() {
            None => Err(PipelineError::EmptyConversation),
            Some(last) if last.role != MessageRole::User => {
                Err(PipelineError::LastMessageNotUser)
            }
            Some(_) => Ok(Self {
                messages,
                sentiment: None,
            }),
        }
    }

    pub fn latest(&self) -> Option<&LlmMessage> {
        self.messages.last()
    }

    /// Most recent user-authored message
    pub fn latest_user(&self) -> Option<&LlmMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
    }

    /// Assistant reply appended by the response stage, if any
    pub fn reply(&self) -> Option<&str> {
        self.latest()
            .filter(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("conversation has no messages")]
    EmptyConversation,
    #[error("last message must be authored by the user")]
    LastMessageNotUser,
    #[error("response stage failed: {0}")]
    Llm(#[from] LlmError),
}
