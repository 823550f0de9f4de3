//! Report indexing module.
//!
//! Handles text chunking and the pipeline that turns finished
//! reports into knowledge-base entries. Key features:
//!
//! - UTF-8 safe character-based chunking
//! - Configurable chunk size and overlap (fixed stride)
//! - Metadata replicated onto every chunk of a report
//!
//! # Safety
//!
//! The chunker slices on character boundaries collected via
//! `char_indices()`, so emoji and other multi-byte sequences never
//! cause a panic. Overlap values that would stall the stride are
//! rejected when the chunker is constructed.

pub mod chunker;
pub mod pipeline;

pub use chunker::{Chunker, Chunks, Window};
pub use pipeline::ReportIndexer;
