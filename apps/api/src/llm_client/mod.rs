/// The single point of entry for all LLM provider calls.
///
/// No other module talks to OpenAI or Gemini directly. Callers hold an ordered
/// list of `CompletionProvider`s and try them in turn; a provider failing for
/// any reason (missing key, transport, API status, unparseable output) only
/// means "move on to the next one".
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured")]
    NotConfigured { provider: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling options for a single completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Near-deterministic extraction (requirements parsing).
    pub const EXTRACTION: Self = Self {
        temperature: 0.1,
        max_tokens: 2000,
    };

    /// More varied output (project ideas).
    pub const CREATIVE: Self = Self {
        temperature: 0.7,
        max_tokens: 3000,
    };
}

/// A text-completion backend that is asked to return JSON.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name, e.g. "openai". Recorded alongside results.
    fn name(&self) -> &'static str;

    /// Model identifier sent to the provider.
    fn model(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError>;
}

pub type SharedProvider = Arc<dyn CompletionProvider>;

/// Calls the provider and deserializes the text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    provider: &dyn CompletionProvider,
    system: &str,
    prompt: &str,
    options: CompletionOptions,
) -> Result<T, LlmError> {
    let text = provider.complete(system, prompt, options).await?;
    let text = strip_json_fences(&text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Builds the default provider order: OpenAI first, then Gemini.
/// Both are always present; an unconfigured one reports `NotConfigured`.
pub fn default_providers(
    openai_api_key: Option<String>,
    gemini_api_key: Option<String>,
    timeout: Duration,
) -> Result<Vec<SharedProvider>, LlmError> {
    Ok(vec![
        Arc::new(OpenAiClient::new(openai_api_key, timeout)?),
        Arc::new(GeminiClient::new(gemini_api_key, timeout)?),
    ])
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
