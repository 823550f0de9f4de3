// In-process stand-ins for the web search, chat model and knowledge backends

use async_trait::async_trait;
use researchgpt::core::error::{ResearchError, Result};
use researchgpt::core::llm::{ChatModel, Message};
use researchgpt::core::search::WebSearch;
use researchgpt::core::storage::KnowledgeStore;
use researchgpt::core::types::{ChunkMetadata, KnowledgeHit, WebResult};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Search backend returning a fixed result list
#[allow(dead_code)]
pub struct StaticSearch {
    results: Vec<WebResult>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticSearch {
    pub fn new(results: Vec<WebResult>) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearch for StaticSearch {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<WebResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.iter().take(max_results).cloned().collect())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Search backend that always fails
#[allow(dead_code)]
pub struct FailingSearch;

#[async_trait]
impl WebSearch for FailingSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<WebResult>> {
        Err(ResearchError::SearchFailed("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Chat model returning a fixed reply and recording every prompt
#[allow(dead_code)]
pub struct ScriptedModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().pop().expect("model was never called")
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        assert_eq!(messages.len(), 1, "expected a single user message");
        assert_eq!(messages[0].role, "user");

        self.prompts.lock().unwrap().push(messages[0].content.clone());
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Chat model that always fails like an overloaded endpoint
#[allow(dead_code)]
pub struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn complete(&self, _messages: &[Message]) -> Result<String> {
        Err(ResearchError::LlmFailed("HTTP 503: service unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Knowledge store whose index cannot be read or written
#[allow(dead_code)]
pub struct FailingKnowledge;

impl KnowledgeStore for FailingKnowledge {
    fn add_texts(&self, _texts: &[String], _metadatas: &[ChunkMetadata]) -> Result<usize> {
        Err(ResearchError::StorageError("index is locked".to_string()))
    }

    fn similarity_search(&self, _query: &str, _k: usize) -> Result<Vec<KnowledgeHit>> {
        Err(ResearchError::StorageError("index is corrupt".to_string()))
    }

    fn count(&self) -> u64 {
        0
    }

    fn clear(&self) -> Result<u64> {
        Err(ResearchError::StorageError("index is locked".to_string()))
    }

    fn location(&self) -> Option<&Path> {
        None
    }
}
