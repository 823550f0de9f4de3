//! Storage layer for the knowledge base.
//!
//! Wraps Tantivy to keep chunks of past reports searchable.
//!
//! # Architecture
//!
//! - **KnowledgeStore**: Trait the research pipeline talks to
//! - **TantivyIndex**: Wraps Tantivy index operations
//! - **KnowledgeBase**: Tantivy-backed `KnowledgeStore`
//!
//! # Storage Structure
//!
//! ```text
//! {data_dir}/knowledge/
//! ├── .managed.json
//! ├── meta.json
//! └── [segment files]
//! ```
//!
//! With persistence disabled the index is created in RAM and
//! nothing is written to disk.

mod knowledge;
mod tantivy;

pub use self::tantivy::SCHEMA_VERSION;
pub use knowledge::KnowledgeBase;

use crate::core::error::Result;
use crate::core::types::{ChunkMetadata, KnowledgeHit};
use std::path::Path;

/// Searchable store of past report chunks
pub trait KnowledgeStore: Send + Sync {
    /// Insert chunks with their metadata, one entry per text.
    /// Returns the number of chunks written.
    fn add_texts(&self, texts: &[String], metadatas: &[ChunkMetadata]) -> Result<usize>;

    /// Up to `k` chunks ranked by relevance to `query`
    fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<KnowledgeHit>>;

    fn count(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Delete every chunk, returning how many were removed
    fn clear(&self) -> Result<u64>;

    /// Index directory, `None` for in-memory stores
    fn location(&self) -> Option<&Path>;
}
