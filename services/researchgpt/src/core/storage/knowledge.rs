//! Knowledge base of past research.
//!
//! Stores report chunks with their `{query, timestamp}` metadata and
//! answers similarity queries with BM25 ranking. The index lives in a
//! directory owned by Tantivy, or in RAM when persistence is off.
//!
//! Only a reader is kept open. Writes take the index lock for the
//! duration of one commit.

use crate::core::error::{Result, ResearchError};
use crate::core::storage::tantivy::{KnowledgeFields, TantivyIndex};
use crate::core::storage::KnowledgeStore;
use crate::core::types::{ChunkMetadata, KnowledgeHit};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tantivy::{
    collector::TopDocs,
    query::QueryParser,
    schema::{Field, Value},
    IndexReader, TantivyDocument,
};

/// Similarity index over past research reports
pub struct KnowledgeBase {
    index: TantivyIndex,
    reader: IndexReader,
    /// Serializes writes from this process
    write_lock: Mutex<()>,
    location: Option<PathBuf>,
}

impl std::fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("location", &self.location)
            .finish()
    }
}

impl KnowledgeBase {
    /// Open (or create) a persistent knowledge base at `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        let index = TantivyIndex::open_or_create(dir)?;
        tracing::debug!("Knowledge base opened at {:?}", dir);
        Self::from_index(index, Some(dir.to_path_buf()))
    }

    /// Create a knowledge base that is discarded when the process exits
    pub fn in_memory() -> Result<Self> {
        Self::from_index(TantivyIndex::create_in_ram()?, None)
    }

    fn from_index(index: TantivyIndex, location: Option<PathBuf>) -> Result<Self> {
        let reader = index.reader()?;

        Ok(Self {
            index,
            reader,
            write_lock: Mutex::new(()),
            location,
        })
    }

    fn fields(&self) -> KnowledgeFields {
        self.index.fields()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ResearchError::StorageError("Knowledge base write lock poisoned".to_string()))
    }

    fn reload(&self) -> Result<()> {
        self.reader
            .reload()
            .map_err(|e| ResearchError::StorageError(format!("Failed to reload reader: {e}")))
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }

    /// Extract i64 field from document
    fn extract_i64(doc: &TantivyDocument, field: Field) -> i64 {
        doc.get_first(field).and_then(|v| v.as_i64()).unwrap_or(0)
    }
}

impl KnowledgeStore for KnowledgeBase {
    fn add_texts(&self, texts: &[String], metadatas: &[ChunkMetadata]) -> Result<usize> {
        if texts.len() != metadatas.len() {
            return Err(ResearchError::InvalidInput(format!(
                "{} texts but {} metadata entries",
                texts.len(),
                metadatas.len()
            )));
        }
        if texts.is_empty() {
            return Ok(0);
        }

        {
            let _guard = self.lock()?;
            self.index.add_texts(texts, metadatas)?;
        }
        self.reload()?;

        tracing::debug!("Added {} chunk(s) to knowledge base", texts.len());
        Ok(texts.len())
    }

    fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<KnowledgeHit>> {
        if query.trim().is_empty() {
            return Err(ResearchError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let searcher = self.reader.searcher();
        if searcher.num_docs() == 0 || k == 0 {
            return Ok(Vec::new());
        }

        let fields = self.fields();
        let query_parser =
            QueryParser::for_index(self.index.index(), vec![fields.text, fields.query]);

        // Free-text questions routinely contain query syntax characters
        let (parsed, errors) = query_parser.parse_query_lenient(query);
        if !errors.is_empty() {
            tracing::debug!("Lenient parse dropped {} query fragment(s)", errors.len());
        }

        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(k))
            .map_err(|e| ResearchError::StorageError(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                ResearchError::StorageError(format!("Failed to retrieve document: {e}"))
            })?;

            hits.push(KnowledgeHit {
                score,
                text: Self::extract_text(&doc, fields.text),
                metadata: ChunkMetadata {
                    query: Self::extract_text(&doc, fields.query),
                    timestamp: Self::extract_text(&doc, fields.timestamp),
                },
                chunk_index: Self::extract_i64(&doc, fields.chunk_index) as usize,
            });
        }

        Ok(hits)
    }

    fn count(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn clear(&self) -> Result<u64> {
        // Pick up commits made by other processes before counting
        self.reload()?;
        let removed = self.count();
        {
            let _guard = self.lock()?;
            self.index.delete_all()?;
        }
        self.reload()?;

        tracing::info!("Cleared {} chunk(s) from knowledge base", removed);
        Ok(removed)
    }

    fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}
