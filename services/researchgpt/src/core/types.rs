//! Core data types for ResearchGPT.
//!
//! Records, chunks, web results and knowledge-base hits shared by
//! the core services and the CLI adapter.

use serde::{Deserialize, Serialize};

/// Format used for record timestamps and chunk metadata
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A completed research query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRecord {
    /// The question as entered
    pub query: String,

    /// Report text returned by the language model
    pub report: String,

    /// Local completion time (`%Y-%m-%d %H:%M:%S`)
    pub timestamp: String,
}

impl ResearchRecord {
    /// Create a record stamped with the current local time
    pub fn new(query: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            report: report.into(),
            timestamp: now_timestamp(),
        }
    }

    /// Compact form of the timestamp for file names (`20240131_154502`)
    pub fn file_stamp(&self) -> String {
        self.timestamp
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('_'),
                '-' | ':' => None,
                other => Some(other),
            })
            .collect()
    }

    /// Metadata replicated onto every chunk of this record's report
    pub fn chunk_metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            query: self.query.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A single text window produced by the chunker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Character offset where the window starts
    pub char_start: usize,

    /// Byte offset where chunk starts in the source text
    pub start_offset: usize,

    /// Byte offset where chunk ends in the source text
    pub end_offset: usize,

    /// Sequential chunk number
    pub chunk_index: usize,
}

/// Metadata stored alongside each indexed chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub query: String,
    pub timestamp: String,
}

/// A single web search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub body: String,
    pub url: String,
}

/// A knowledge-base match for a similarity query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeHit {
    /// BM25 relevance score (higher = more relevant)
    pub score: f32,

    /// Chunk text content
    pub text: String,

    /// Query and timestamp of the report the chunk came from
    pub metadata: ChunkMetadata,

    /// Position of the chunk within its report
    pub chunk_index: usize,
}

/// Statistics from indexing one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total chunks created
    pub chunks_created: usize,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,
}

/// Result of one research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOutcome {
    pub record: ResearchRecord,

    /// Web results the report was grounded on
    pub sources: Vec<WebResult>,

    /// Number of past-research chunks placed in the prompt
    pub kb_hits: usize,

    /// Chunks written to the knowledge base
    pub chunks_indexed: usize,

    /// Whether the report made it into the knowledge base
    pub indexed: bool,

    /// End-to-end duration in milliseconds
    pub duration_ms: u64,
}
