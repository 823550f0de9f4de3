//! ResearchGPT - Research Assistant with Knowledge-Base Recall
//!
//! Answers free-text research questions by combining fresh web
//! results with excerpts of earlier reports, and asks an
//! OpenAI-compatible chat model to write the final report.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (front-end agnostic)
//!   - config, error, types, xdg
//!   - indexer (fixed-stride chunking, report indexing)
//!   - storage (Tantivy knowledge base)
//!   - search, llm (remote backends behind traits)
//!   - prompts, research, history
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - one-shot and interactive research, knowledge-base tools
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character-based, never panics)
//! - BM25 recall of past reports via Tantivy
//! - DuckDuckGo web search, no API key required
//! - Any OpenAI-compatible chat endpoint (Groq by default)

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{ResearchError, Result};
pub use core::research::{ResearchRequest, ResearchService, ResearchSession};
pub use core::services::Services;
pub use core::types::*;
