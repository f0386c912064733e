//! Property-based tests for the chat completions translation layer
//!
//! - Every message survives translation with role and content intact
//! - Message order is preserved
//! - Any first choice normalizes to its text

use super::config::LlmConfig;
use super::openai::{self, ChatChoice, ChatMessage, ChatResponse, OpenAICompatService};
use super::types::{LlmMessage, LlmRequest, MessageRole};
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = MessageRole> {
    prop_oneof![Just(MessageRole::User), Just(MessageRole::Assistant)]
}

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (arb_role(), "[a-zA-Z0-9 _.!?,\n]{0,80}").prop_map(|(role, content)| LlmMessage { role, content })
}

proptest! {
    #[test]
    fn translated_message_keeps_role_and_content(msg in arb_message()) {
        let wire = openai::translate_message(&msg);
        prop_assert_eq!(wire.role.as_str(), msg.role.as_str());
        prop_assert_eq!(wire.content.as_deref(), Some(msg.content.as_str()));
    }

    #[test]
    fn translated_request_preserves_order(messages in proptest::collection::vec(arb_message(), 1..10)) {
        let service = OpenAICompatService::new("k".to_string(), &LlmConfig::default()).unwrap();
        let wire = service.translate_request(&LlmRequest::new(messages.clone()));

        prop_assert_eq!(wire.messages.len(), messages.len());
        for (sent, original) in wire.messages.iter().zip(&messages) {
            prop_assert_eq!(sent.content.as_deref(), Some(original.content.as_str()));
        }
        prop_assert!(!wire.stream);
    }

    #[test]
    fn first_choice_text_is_reply(
        texts in proptest::collection::vec("[a-zA-Z0-9 ]{0,40}", 1..4),
        finish in prop_oneof![Just("stop"), Just("length")],
    ) {
        let choices = texts
            .iter()
            .map(|t| ChatChoice {
                message: ChatMessage { role: "assistant".to_string(), content: Some(t.clone()) },
                finish_reason: Some(finish.to_string()),
            })
            .collect();
        let normalized = OpenAICompatService::normalize_response(ChatResponse { choices, usage: None }).unwrap();

        prop_assert_eq!(&normalized.text, &texts[0]);
        prop_assert_eq!(normalized.end_turn, finish == "stop");
    }
}
