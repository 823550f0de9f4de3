//! UTF-8 safe fixed-stride text chunking.
//!
//! Splits text into overlapping fixed-size windows measured in
//! characters. Window `i` starts at `i * (chunk_size - overlap)`
//! and generation stops once a start offset reaches the end of the
//! text. The final window is never padded and may be shorter than
//! `chunk_size`.
//!
//! Boundaries come from `char_indices()`, so slices always fall on
//! character boundaries and never panic on multi-byte input.
//!
//! # Example
//!
//! ```
//! use researchgpt::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(4, 2).unwrap();
//! let windows: Vec<&str> = chunker.chunks("abcdefghij").map(|c| c.text).collect();
//! assert_eq!(windows, ["abcd", "cdef", "efgh", "ghij", "ij"]);
//! ```

use crate::core::error::{Result, ResearchError};
use crate::core::types::Chunk;

/// Fixed-stride text chunker.
///
/// All sizes are measured in **characters**, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters shared by consecutive chunks
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::InvalidChunking`] if `chunk_size` is 0
    /// or if `overlap >= chunk_size` (the stride would not advance).
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ResearchError::InvalidChunking(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(ResearchError::InvalidChunking(format!(
                "overlap ({overlap}) must be < chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance in characters between consecutive window starts.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Lazily iterate over the windows of `text`.
    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        // Byte offset of every char start, plus the end of the text
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());

        Chunks {
            text,
            boundaries,
            chunk_size: self.chunk_size,
            stride: self.stride(),
            next_start: 0,
            next_index: 0,
            finished: text.is_empty(),
        }
    }

    /// Chunk text into owned, overlapping segments.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        self.chunks(text)
            .map(|window| Chunk {
                text: window.text.to_string(),
                char_start: window.char_start,
                start_offset: window.start_offset,
                end_offset: window.end_offset,
                chunk_index: window.index,
            })
            .collect()
    }
}

/// A borrowed window produced by [`Chunks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub text: &'a str,
    pub index: usize,
    pub char_start: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Iterator over the windows of a text. Finite and not restartable.
#[derive(Debug)]
pub struct Chunks<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
    chunk_size: usize,
    stride: usize,
    next_start: usize,
    next_index: usize,
    finished: bool,
}

impl<'a> Chunks<'a> {
    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let char_len = self.char_len();
        if self.finished || self.next_start >= char_len {
            self.finished = true;
            return None;
        }

        let char_start = self.next_start;
        let char_end = (char_start + self.chunk_size).min(char_len);
        let start_offset = self.boundaries[char_start];
        let end_offset = self.boundaries[char_end];

        let window = Window {
            text: &self.text[start_offset..end_offset],
            index: self.next_index,
            char_start,
            start_offset,
            end_offset,
        };

        // A text that fits in one window is returned whole
        if char_len <= self.chunk_size {
            self.finished = true;
        }
        self.next_start += self.stride;
        self.next_index += 1;

        Some(window)
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
