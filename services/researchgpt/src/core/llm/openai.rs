//! OpenAI-compatible chat completions client (Groq by default).

use crate::core::config::LlmConfig;
use crate::core::error::{Result, ResearchError};
use crate::core::llm::{ChatModel, Message};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

static VERSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/v\d+$").expect("valid regex"));

/// Longest error body echoed back in [`ResearchError::LlmFailed`]
const MAX_ERROR_BODY: usize = 500;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Resolve the chat completions endpoint from a base URL.
///
/// Accepts a full endpoint, a versioned base (`…/v1`, `…/openai/v1`)
/// or a bare host, which gets `/v1` appended.
pub fn chat_endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else if VERSION_SUFFIX.is_match(base) {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

/// Chat client for OpenAI-compatible APIs
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    allow_anonymous: bool,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// A missing API key is not an error here; it is reported by the
    /// first [`ChatModel::complete`] call so that commands which never
    /// reach the model keep working.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(&config.base_url),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            allow_anonymous: config.allow_anonymous,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Resolved request URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether an API key was found
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        if self.api_key.is_none() && !self.allow_anonymous {
            return Err(ResearchError::MissingApiKey(self.api_key_env.clone()));
        }

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!("Chat completion request to {} ({})", self.endpoint, self.model);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(ResearchError::LlmFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                snippet.trim()
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        extract_content(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn extract_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ResearchError::LlmFailed("empty completion".to_string()))
}
