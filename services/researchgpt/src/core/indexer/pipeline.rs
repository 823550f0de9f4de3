//! Report indexing pipeline.
//!
//! Coordinates writing a finished report into the knowledge base:
//! 1. Chunk the report text
//! 2. Replicate the report metadata onto every chunk
//! 3. Insert the chunks into the knowledge base

use std::time::Instant;

use crate::core::error::Result;
use crate::core::indexer::Chunker;
use crate::core::storage::KnowledgeStore;
use crate::core::types::{ChunkMetadata, IndexStats};

/// Orchestrates report indexing
#[derive(Debug, Clone, Copy)]
pub struct ReportIndexer {
    chunker: Chunker,
}

impl ReportIndexer {
    /// Create a new report indexer
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - Size of chunks in characters
    /// * `overlap` - Overlap between chunks in characters
    ///
    /// # Errors
    ///
    /// Fails when `overlap >= chunk_size` or `chunk_size == 0`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Ok(Self {
            chunker: Chunker::new(chunk_size, overlap)?,
        })
    }

    /// The chunker used for reports
    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Split a report into chunk texts with replicated metadata
    pub fn prepare(
        &self,
        report: &str,
        metadata: &ChunkMetadata,
    ) -> (Vec<String>, Vec<ChunkMetadata>) {
        let texts: Vec<String> = self
            .chunker
            .chunks(report)
            .map(|window| window.text.to_string())
            .collect();
        let metadatas = vec![metadata.clone(); texts.len()];
        (texts, metadatas)
    }

    /// Chunk a report and insert it into the knowledge base
    pub fn index_report(
        &self,
        knowledge: &dyn KnowledgeStore,
        report: &str,
        metadata: &ChunkMetadata,
    ) -> Result<IndexStats> {
        let start = Instant::now();

        let (texts, metadatas) = self.prepare(report, metadata);
        let chunks_created = knowledge.add_texts(&texts, &metadatas)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Indexed report for '{}': {} chunk(s) in {}ms",
            metadata.query,
            chunks_created,
            duration_ms
        );

        Ok(IndexStats {
            chunks_created,
            duration_ms,
        })
    }
}
