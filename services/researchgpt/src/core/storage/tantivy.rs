//! Tantivy integration for the knowledge base.
//!
//! This module wraps Tantivy operations for creating, opening and
//! writing the index of past research chunks.

use crate::core::error::{Result, ResearchError};
use crate::core::types::ChunkMetadata;
use chrono::Utc;
use std::path::Path;
use tantivy::schema::*;
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy};

/// Current schema version
/// Version 1: text, query, timestamp, chunk_index, indexed_at
pub const SCHEMA_VERSION: u32 = 1;

/// Writer heap budget
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Create the Tantivy schema for knowledge-base chunks
///
/// Fields:
/// - text: Report chunk content (TEXT | STORED)
/// - query: Question the report answered (TEXT | STORED)
/// - timestamp: Report completion time (STRING | STORED)
/// - chunk_index: Position within the report (i64 | STORED)
/// - indexed_at: Insert time (Date | STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Searchable content
    builder.add_text_field("text", TEXT | STORED);
    builder.add_text_field("query", TEXT | STORED);

    // Metadata (stored for retrieval)
    builder.add_text_field("timestamp", STRING | STORED);
    builder.add_i64_field("chunk_index", STORED);
    builder.add_date_field("indexed_at", STORED);

    builder.build()
}

/// Resolved schema fields
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeFields {
    pub text: Field,
    pub query: Field,
    pub timestamp: Field,
    pub chunk_index: Field,
    pub indexed_at: Field,
}

impl KnowledgeFields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| ResearchError::StorageError(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            text: field("text")?,
            query: field("query")?,
            timestamp: field("timestamp")?,
            chunk_index: field("chunk_index")?,
            indexed_at: field("indexed_at")?,
        })
    }
}

/// Tantivy index wrapper
///
/// No writer is held between operations. Each write acquires the
/// directory lock, commits and releases it, so several processes can
/// share one index directory.
pub struct TantivyIndex {
    /// Tantivy index instance
    index: Index,

    /// Resolved schema fields
    fields: KnowledgeFields,
}

impl std::fmt::Debug for TantivyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyIndex")
            .field("schema", &"<schema>")
            .finish()
    }
}

impl TantivyIndex {
    /// Create a new Tantivy index at the given path
    pub fn create(index_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(index_dir)?;

        let index = Index::create_in_dir(index_dir, create_schema())
            .map_err(|e| ResearchError::StorageError(format!("Failed to create index: {e}")))?;

        Self::from_index(index)
    }

    /// Open an existing Tantivy index
    pub fn open(index_dir: &Path) -> Result<Self> {
        let index = Index::open_in_dir(index_dir)
            .map_err(|e| ResearchError::StorageError(format!("Failed to open index: {e}")))?;

        Self::from_index(index)
    }

    /// Open the index at `index_dir`, creating it on first use
    pub fn open_or_create(index_dir: &Path) -> Result<Self> {
        if index_dir.join("meta.json").exists() {
            Self::open(index_dir)
        } else {
            Self::create(index_dir)
        }
    }

    /// Create an index that lives only for the lifetime of the process
    pub fn create_in_ram() -> Result<Self> {
        Self::from_index(Index::create_in_ram(create_schema()))
    }

    fn from_index(index: Index) -> Result<Self> {
        let fields = KnowledgeFields::resolve(&index.schema())?;
        Ok(Self { index, fields })
    }

    /// Run `op` against a fresh writer and commit.
    ///
    /// On failure nothing queued by `op` is committed. The writer and
    /// its directory lock are released before returning.
    fn write<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&IndexWriter, KnowledgeFields) -> Result<()>,
    {
        let mut writer: IndexWriter = self
            .index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| ResearchError::StorageError(format!("Failed to create writer: {e}")))?;

        if let Err(e) = op(&writer, self.fields) {
            if let Err(rollback_err) = writer.rollback() {
                tracing::warn!("Rollback after failed write also failed: {}", rollback_err);
            }
            return Err(e);
        }

        writer
            .commit()
            .map_err(|e| ResearchError::StorageError(format!("Failed to commit: {e}")))?;
        writer
            .wait_merging_threads()
            .map_err(|e| ResearchError::StorageError(format!("Failed to close writer: {e}")))?;
        Ok(())
    }

    /// Add texts with parallel metadata as one committed batch
    pub fn add_texts(&self, texts: &[String], metadatas: &[ChunkMetadata]) -> Result<()> {
        let now = tantivy::DateTime::from_timestamp_secs(Utc::now().timestamp());

        self.write(|writer, fields| {
            for (i, (text, meta)) in texts.iter().zip(metadatas).enumerate() {
                let doc = doc!(
                    fields.text => text.as_str(),
                    fields.query => meta.query.as_str(),
                    fields.timestamp => meta.timestamp.as_str(),
                    fields.chunk_index => i as i64,
                    fields.indexed_at => now,
                );

                writer.add_document(doc).map_err(|e| {
                    ResearchError::StorageError(format!("Failed to add document: {e}"))
                })?;
            }
            Ok(())
        })
    }

    /// Remove every document and commit
    pub fn delete_all(&self) -> Result<()> {
        self.write(|writer, _| {
            writer.delete_all_documents().map_err(|e| {
                ResearchError::StorageError(format!("Failed to delete documents: {e}"))
            })?;
            Ok(())
        })
    }

    /// Get an index reader that follows commits from any writer
    pub fn reader(&self) -> Result<IndexReader> {
        self.index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| ResearchError::StorageError(format!("Failed to create reader: {e}")))
    }

    /// Get the resolved schema fields
    pub fn fields(&self) -> KnowledgeFields {
        self.fields
    }

    /// Get a reference to the underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }
}
