//! Provider configuration and service construction

use super::{LlmError, LlmService, LoggingService, OpenAICompatService};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the hosted completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential, supplied out-of-band
    pub api_key: Option<String>,
    /// Full URL of the `chat/completions` endpoint
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            api_key: lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: lookup("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("CHAT_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(lookup("CHAT_TEMPERATURE"), "CHAT_TEMPERATURE", defaults.temperature),
            max_tokens: lookup("CHAT_MAX_TOKENS").and_then(|v| match v.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!(value = %v, "Ignoring invalid CHAT_MAX_TOKENS");
                    None
                }
            }),
            timeout: Duration::from_secs(parse_or(
                lookup("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
        }
    }

    /// Create the logging-wrapped provider service.
    ///
    /// Fails with an auth error when no credential is configured.
    pub fn build_service(&self) -> Result<Arc<dyn LlmService>, LlmError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| LlmError::auth("GROQ_API_KEY is not set"))?;

        let service = OpenAICompatService::new(api_key, self)?;
        Ok(Arc::new(LoggingService::new(Arc::new(service))))
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    name: &str,
    default: T,
) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
        None => default,
    }
}
