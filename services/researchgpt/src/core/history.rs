//! In-memory research history and report export.
//!
//! History lives only as long as the owning session. Entries are kept
//! in insertion order and displayed newest first.

use crate::core::error::{Result, ResearchError};
use crate::core::types::ResearchRecord;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Ordered list of completed research records
#[derive(Debug, Clone, Default)]
pub struct ResearchHistory {
    records: Vec<ResearchRecord>,
}

impl ResearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed record
    pub fn push(&mut self, record: ResearchRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order (most recent first)
    pub fn newest_first(&self) -> impl Iterator<Item = &ResearchRecord> {
        self.records.iter().rev()
    }

    /// Entry `n` of the display order, counting from 1
    pub fn get(&self, n: usize) -> Result<&ResearchRecord> {
        if n == 0 || n > self.records.len() {
            return Err(ResearchError::RecordNotFound(n));
        }
        Ok(&self.records[self.records.len() - n])
    }

    /// Drop every record, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }
}

/// Download file name for a record (`research_20240131_154502.txt`)
pub fn report_file_name(record: &ResearchRecord) -> String {
    format!("research_{}.txt", record.file_stamp())
}

/// Write the report text into `dir`, creating it if needed.
///
/// An existing file is never overwritten; later exports of the same
/// second get a `_1`, `_2`, ... suffix.
pub fn export_report(record: &ResearchRecord, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let mut attempt = 0usize;

    loop {
        let name = if attempt == 0 {
            report_file_name(record)
        } else {
            format!("research_{}_{attempt}.txt", record.file_stamp())
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(record.report.as_bytes())?;
                tracing::info!("Report saved to {:?}", path);
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
