//! The four pipeline stages
//!
//! Each stage takes the state by value and hands it back, so the runner is a
//! plain fold over [`Stage::ALL`].

use super::{PipelineState, Sentiment};
use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService};

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Trim,
    Sentiment,
    Respond,
    Log,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Trim, Stage::Sentiment, Stage::Respond, Stage::Log];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Trim => "preprocess",
            Stage::Sentiment => "sentiment",
            Stage::Respond => "chatbot",
            Stage::Log => "logger",
        }
    }
}

/// Strip leading and trailing whitespace from the newest message
pub fn trim(mut state: PipelineState) -> PipelineState {
    if let Some(last) = state.messages.last_mut() {
        let trimmed = last.content.trim();
        if trimmed.len() != last.content.len() {
            last.content = trimmed.to_string();
        }
    }
    state
}

/// Label the newest message
pub fn classify(mut state: PipelineState) -> PipelineState {
    let text = state.latest().map_or("", |m| m.content.as_str());
    state.sentiment = Some(Sentiment::classify(text));
    state
}

/// Ask the provider for a reply to the whole conversation.
///
/// On failure the state is dropped; nothing is appended.
pub async fn respond(
    mut state: PipelineState,
    llm: &dyn LlmService,
    max_tokens: Option<u32>,
) -> Result<PipelineState, LlmError> {
    let request = LlmRequest::new(state.messages.clone()).with_max_tokens(max_tokens);
    let response = llm.complete(&request).await?;
    state.messages.push(LlmMessage::assistant(response.text));
    Ok(state)
}

/// Emit the exchange to the diagnostic stream
pub fn log(state: PipelineState) -> PipelineState {
    tracing::info!(
        target: "sentiment_chat::exchange",
        sentiment = state.sentiment.map(Sentiment::label),
        messages = state.messages.len(),
        "{}",
        log_line(&state)
    );
    state
}

/// Human-readable summary of a finished run: the user's (trimmed) text,
/// the latest message and the sentiment label.
pub fn log_line(state: &PipelineState) -> String {
    let latest = state.latest().map_or("", |m| m.content.as_str());
    let label = state.sentiment.map_or("Unclassified", Sentiment::label);

    match state.latest_user() {
        Some(user) if state.reply().is_some() => {
            format!("LOG ➜ {} ➜ {latest} | Sentiment: {label}", user.content)
        }
        _ => format!("LOG ➜ {latest} | Sentiment: {label}"),
    }
}
