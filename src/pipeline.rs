//! Linear conversation pipeline
//!
//! trim → sentiment → respond → log, strictly in that order. A run either
//! completes all four stages or fails outright; no state survives between
//! runs.

mod sentiment;
mod stage;
mod state;

#[cfg(test)]
mod proptests;

pub use sentiment::Sentiment;
pub use stage::Stage;
pub use state::{PipelineError, PipelineState};

use crate::llm::{LlmMessage, LlmService};
use std::sync::Arc;
use tracing::Instrument;

/// Runs the fixed stage sequence against an injected provider
pub struct Pipeline {
    llm: Arc<dyn LlmService>,
    max_tokens: Option<u32>,
}

impl Pipeline {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            llm,
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Run one submission.
    ///
    /// `messages` must end with the new user message; earlier entries are
    /// passed to the provider as context.
    pub async fn run(&self, messages: Vec<LlmMessage>) -> Result<PipelineState, PipelineError> {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("pipeline_run", %run_id, model = %self.llm.model_id());
        self.run_stages(messages).instrument(span).await
    }

    async fn run_stages(&self, messages: Vec<LlmMessage>) -> Result<PipelineState, PipelineError> {
        let mut state = PipelineState::new(messages)?;

        for step in Stage::ALL {
            state = match step {
                Stage::Trim => stage::trim(state),
                Stage::Sentiment => stage::classify(state),
                Stage::Respond => stage::respond(state, self.llm.as_ref(), self.max_tokens).await?,
                Stage::Log => stage::log(state),
            };
            tracing::debug!(stage = step.name(), "Stage complete");
        }

        Ok(state)
    }
}
