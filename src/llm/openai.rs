//! `OpenAI`-compatible `chat/completions` provider (Groq by default)

use super::config::LlmConfig;
use super::types::{LlmMessage, LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat completions client for any `OpenAI`-compatible endpoint
pub struct OpenAICompatService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAICompatService {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub(super) fn translate_request(&self, request: &LlmRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(translate_message).collect(),
            temperature: Some(self.temperature),
            max_tokens: request.max_tokens,
            stream: false,
        }
    }

    pub(super) fn normalize_response(resp: ChatResponse) -> Result<LlmResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        let end_turn = choice.finish_reason.as_deref() == Some("stop");
        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        Ok(LlmResponse {
            text: choice.message.content.unwrap_or_default(),
            end_turn,
            usage,
        })
    }
}

pub(super) fn translate_message(msg: &LlmMessage) -> ChatMessage {
    ChatMessage {
        role: msg.role.as_str().to_string(),
        content: Some(msg.content.clone()),
    }
}

#[async_trait]
impl LlmService for OpenAICompatService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let chat_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(error_resp) => LlmError::from_status(status.as_u16(), &error_resp.error.message),
                Err(_) => LlmError::from_status(status.as_u16(), &body),
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(chat_response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
pub(super) struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
