//! Core domain logic (front-end agnostic)
//!
//! This module contains all research logic that is independent
//! of how the user drives it.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Fixed-stride chunking and report indexing
//! - **storage**: Tantivy-backed knowledge base
//! - **search**: Web search backends
//! - **llm**: Chat-completion backends
//! - **prompts**: Report prompt templates
//! - **research**: Research orchestration and sessions
//! - **history**: In-memory history and report export
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod history;
pub mod indexer;
pub mod llm;
pub mod prompts;
pub mod research;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ResearchError, Result};
pub use services::Services;
