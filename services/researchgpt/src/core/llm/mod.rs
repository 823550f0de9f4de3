//! Chat-completion backends.
//!
//! The research service talks to a [`ChatModel`]; the production
//! implementation is [`OpenAiChatClient`], which works against any
//! OpenAI-compatible `/chat/completions` endpoint.

mod openai;

pub use openai::{chat_endpoint, OpenAiChatClient};

use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// A `user` role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A language model that turns a conversation into a completion
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Return the assistant reply for `messages`
    async fn complete(&self, messages: &[Message]) -> Result<String>;

    /// Model identifier for logs and `get-info`
    fn model_name(&self) -> &str;
}
