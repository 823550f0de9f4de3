//! Unified service container for ResearchGPT
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::llm::{ChatModel, OpenAiChatClient};
use crate::core::research::ResearchService;
use crate::core::search::{DuckDuckGoSearch, WebSearch};
use crate::core::storage::{KnowledgeBase, KnowledgeStore};
use std::sync::Arc;

/// Unified services container
///
/// Every CLI command uses this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Web search backend
    pub web: Arc<dyn WebSearch>,

    /// Chat-completion backend
    pub llm: Arc<dyn ChatModel>,

    /// Knowledge base of past reports
    pub knowledge: Arc<dyn KnowledgeStore>,

    /// Research orchestration
    pub research: Arc<ResearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services with the production backends
    pub fn new(config: Config) -> Result<Self> {
        let web: Arc<dyn WebSearch> = Arc::new(DuckDuckGoSearch::from_config(&config.web)?);
        let llm: Arc<dyn ChatModel> = Arc::new(OpenAiChatClient::from_config(&config.llm)?);
        Self::with_backends(config, web, llm)
    }

    /// Create services around caller-supplied search and model backends
    pub fn with_backends(
        config: Config,
        web: Arc<dyn WebSearch>,
        llm: Arc<dyn ChatModel>,
    ) -> Result<Self> {
        let knowledge: Arc<dyn KnowledgeStore> = Arc::new(if config.knowledge.persist {
            KnowledgeBase::open(&config.knowledge.index_dir)?
        } else {
            KnowledgeBase::in_memory()?
        });
        Self::with_store(config, web, llm, knowledge)
    }

    /// Create services around caller-supplied backends, knowledge store included
    pub fn with_store(
        config: Config,
        web: Arc<dyn WebSearch>,
        llm: Arc<dyn ChatModel>,
        knowledge: Arc<dyn KnowledgeStore>,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let research = Arc::new(ResearchService::new(
            Arc::clone(&web),
            Arc::clone(&llm),
            Arc::clone(&knowledge),
            Arc::clone(&config),
        )?);

        Ok(Self {
            web,
            llm,
            knowledge,
            research,
            config,
        })
    }
}
