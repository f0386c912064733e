//! Property-based tests for the pipeline stages
//!
//! - Trim removes exactly the surrounding whitespace and is idempotent
//! - Keyword classification honors positive-before-negative precedence
//! - A successful run appends exactly one assistant message
//! - A failed run appends nothing

use super::stage;
use super::{Pipeline, PipelineError, PipelineState, Sentiment};
use crate::llm::testing::MockLlmService;
use crate::llm::{LlmError, LlmMessage, LlmResponse, MessageRole};
use proptest::prelude::*;
use std::sync::Arc;

/// Text that cannot contain any keyword (no 'o', 'r', 'b', 's' etc. needed
/// to spell good/great/bad/sad)
fn arb_keyword_free() -> impl Strategy<Value = String> {
    "[cfhijklmnpquvwxyz ,.!?]{0,40}"
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,6}"
}

fn arb_positive_keyword() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("good"), Just("great"), Just("GOOD"), Just("Great")]
}

fn arb_negative_keyword() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("bad"), Just("sad"), Just("BAD"), Just("Sad")]
}

fn arb_history() -> impl Strategy<Value = Vec<LlmMessage>> {
    proptest::collection::vec("[a-z ]{1,20}", 0..6).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                if i % 2 == 0 {
                    LlmMessage::user(t)
                } else {
                    LlmMessage::assistant(t)
                }
            })
            .collect()
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn trim_strips_surrounding_whitespace(
        lead in arb_whitespace(),
        core in "[a-z][a-z \t]{0,30}[a-z]",
        tail in arb_whitespace(),
    ) {
        let state = PipelineState::new(vec![LlmMessage::user(format!("{lead}{core}{tail}"))]).unwrap();
        let state = stage::trim(state);
        prop_assert_eq!(&state.messages[0].content, &core);
    }

    #[test]
    fn trim_is_idempotent(text in "[ \ta-z]{0,30}") {
        let once = stage::trim(PipelineState::new(vec![LlmMessage::user(text)]).unwrap());
        let twice = stage::trim(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn positive_keyword_always_positive(
        before in arb_keyword_free(),
        keyword in arb_positive_keyword(),
        after in arb_keyword_free(),
        negative in proptest::option::of(arb_negative_keyword()),
    ) {
        let text = match negative {
            Some(neg) => format!("{before}{neg} {keyword}{after}"),
            None => format!("{before}{keyword}{after}"),
        };
        prop_assert_eq!(Sentiment::classify(&text), Sentiment::Positive);
    }

    #[test]
    fn negative_keyword_without_positive_is_negative(
        before in arb_keyword_free(),
        keyword in arb_negative_keyword(),
        after in arb_keyword_free(),
    ) {
        let text = format!("{before}{keyword}{after}");
        prop_assert_eq!(Sentiment::classify(&text), Sentiment::Negative);
    }

    #[test]
    fn keyword_free_text_is_neutral(text in arb_keyword_free()) {
        prop_assert_eq!(Sentiment::classify(&text), Sentiment::Neutral);
    }

    #[test]
    fn successful_run_appends_one_assistant_message(
        history in arb_history(),
        input in "[a-z ]{1,30}",
        reply in "[a-zA-Z ]{0,30}",
    ) {
        let mut messages = history;
        messages.push(LlmMessage::user(input));
        let n = messages.len();

        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_response(LlmResponse::text(reply.clone()));
        let state = runtime().block_on(Pipeline::new(mock).run(messages)).unwrap();

        prop_assert_eq!(state.messages.len(), n + 1);
        prop_assert_eq!(state.messages[n].role, MessageRole::Assistant);
        prop_assert_eq!(state.reply(), Some(reply.as_str()));
        prop_assert!(state.sentiment.is_some());
    }

    #[test]
    fn failed_run_returns_error(input in "[a-z ]{1,30}") {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_error(LlmError::server_error("Server error: overloaded"));
        let result = runtime().block_on(Pipeline::new(mock.clone()).run(vec![LlmMessage::user(input)]));

        prop_assert!(matches!(result, Err(PipelineError::Llm(_))));
        prop_assert_eq!(mock.recorded_requests().len(), 1);
    }
}
