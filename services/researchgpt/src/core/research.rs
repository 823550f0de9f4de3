//! Research orchestration.
//!
//! One research run goes through these stages in order:
//! 1. Web search for current information
//! 2. Knowledge-base lookup for related past reports
//! 3. Prompt rendering and chat completion
//! 4. Indexing the new report for future lookups
//!
//! The two context stages never fail a run: errors turn into
//! placeholder text in the prompt. Completion errors are returned.

use crate::core::config::Config;
use crate::core::error::{Result, ResearchError};
use crate::core::history::ResearchHistory;
use crate::core::indexer::ReportIndexer;
use crate::core::llm::{ChatModel, Message};
use crate::core::prompts::PromptStyle;
use crate::core::search::{format_web_results, search_error_text, WebSearch, NO_RESULTS};
use crate::core::storage::KnowledgeStore;
use crate::core::types::{KnowledgeHit, ResearchOutcome, ResearchRecord, WebResult};
use std::sync::Arc;
use std::time::Instant;

/// Placeholder when the knowledge base has nothing to offer
pub const KB_EMPTY: &str = "Knowledge base empty.";

/// Placeholder when the knowledge-base lookup failed
pub const KB_UNAVAILABLE: &str = "KB search unavailable.";

/// Parameters of a single research run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRequest {
    pub query: String,

    /// Template override (config default when `None`)
    pub template: Option<PromptStyle>,

    /// Consult the web (still subject to `web.enabled`)
    pub use_web: bool,

    /// Consult and grow the knowledge base (still subject to `knowledge.enabled`)
    pub use_kb: bool,

    /// Result count override (config default when `None`)
    pub max_results: Option<usize>,
}

impl ResearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            template: None,
            use_web: true,
            use_kb: true,
            max_results: None,
        }
    }

    pub fn with_template(mut self, template: PromptStyle) -> Self {
        self.template = Some(template);
        self
    }

    pub fn without_web(mut self) -> Self {
        self.use_web = false;
        self
    }

    pub fn without_kb(mut self) -> Self {
        self.use_kb = false;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Render knowledge-base hits as numbered excerpts for the prompt
pub fn format_kb_results(hits: &[KnowledgeHit], excerpt_chars: usize) -> String {
    if hits.is_empty() {
        return KB_EMPTY.to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let excerpt: String = hit.text.chars().take(excerpt_chars).collect();
            format!(
                "Past Research {}:\nQuery: {}\nDate: {}\nContent: {}...\n",
                i + 1,
                hit.metadata.query,
                hit.metadata.timestamp,
                excerpt
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Runs research queries against the configured backends
pub struct ResearchService {
    web: Arc<dyn WebSearch>,
    llm: Arc<dyn ChatModel>,
    knowledge: Arc<dyn KnowledgeStore>,
    indexer: ReportIndexer,
    config: Arc<Config>,
}

impl ResearchService {
    pub fn new(
        web: Arc<dyn WebSearch>,
        llm: Arc<dyn ChatModel>,
        knowledge: Arc<dyn KnowledgeStore>,
        config: Arc<Config>,
    ) -> Result<Self> {
        let indexer = ReportIndexer::new(config.knowledge.chunk_size, config.knowledge.overlap)?;

        Ok(Self {
            web,
            llm,
            knowledge,
            indexer,
            config,
        })
    }

    /// Run one research query end to end
    pub async fn run(&self, request: &ResearchRequest) -> Result<ResearchOutcome> {
        let start = Instant::now();
        let query = self.validate_query(&request.query)?;
        let template = request.template.unwrap_or(self.config.research.template);
        let use_kb = request.use_kb && self.config.knowledge.enabled;

        tracing::info!("Researching '{}' (template: {})", query, template);

        let (web_context, sources) = if request.use_web && self.config.web.enabled {
            let max_results = request.max_results.unwrap_or(self.config.web.max_results);
            self.web_context(query, max_results).await
        } else {
            (NO_RESULTS.to_string(), Vec::new())
        };

        let (kb_context, kb_hits) = if use_kb {
            self.kb_context(query)
        } else {
            (KB_EMPTY.to_string(), 0)
        };

        let prompt = template.render(query, &web_context, &kb_context);
        tracing::info!("Requesting completion from {}", self.llm.model_name());
        let report = self.llm.complete(&[Message::user(prompt)]).await?;

        let record = ResearchRecord::new(query, report);

        let (chunks_indexed, indexed) = if use_kb {
            match self
                .indexer
                .index_report(self.knowledge.as_ref(), &record.report, &record.chunk_metadata())
            {
                Ok(stats) => (stats.chunks_created, true),
                Err(e) => {
                    tracing::warn!("Failed to add report to knowledge base: {}", e);
                    (0, false)
                }
            }
        } else {
            (0, false)
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Research complete in {}ms", duration_ms);

        Ok(ResearchOutcome {
            record,
            sources,
            kb_hits,
            chunks_indexed,
            indexed,
            duration_ms,
        })
    }

    fn validate_query<'a>(&self, query: &'a str) -> Result<&'a str> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResearchError::InvalidQuery(
                "Please enter a question".to_string(),
            ));
        }

        let max = self.config.research.max_query_length;
        let len = query.chars().count();
        if len > max {
            return Err(ResearchError::InvalidQuery(format!(
                "Query is {len} characters long (limit: {max})"
            )));
        }

        Ok(query)
    }

    async fn web_context(&self, query: &str, max_results: usize) -> (String, Vec<WebResult>) {
        match self.web.search(query, max_results).await {
            Ok(results) => {
                tracing::info!("Web search ({}): {} result(s)", self.web.name(), results.len());
                (format_web_results(&results), results)
            }
            Err(e) => {
                tracing::warn!("Web search failed: {}", e);
                (search_error_text(&e.to_string()), Vec::new())
            }
        }
    }

    fn kb_context(&self, query: &str) -> (String, usize) {
        match self
            .knowledge
            .similarity_search(query, self.config.knowledge.k)
        {
            Ok(hits) => {
                tracing::info!("Knowledge base: {} related chunk(s)", hits.len());
                (
                    format_kb_results(&hits, self.config.knowledge.excerpt_chars),
                    hits.len(),
                )
            }
            Err(e) => {
                tracing::warn!("Knowledge base search failed: {}", e);
                (KB_UNAVAILABLE.to_string(), 0)
            }
        }
    }
}

/// Per-user research context owning the session history
#[derive(Debug, Default)]
pub struct ResearchSession {
    history: ResearchHistory,
}

impl ResearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a query and record it in this session's history on success
    pub async fn research(
        &mut self,
        service: &ResearchService,
        request: &ResearchRequest,
    ) -> Result<ResearchOutcome> {
        let outcome = service.run(request).await?;
        self.history.push(outcome.record.clone());
        Ok(outcome)
    }

    pub fn history(&self) -> &ResearchHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ResearchHistory {
        &mut self.history
    }
}
