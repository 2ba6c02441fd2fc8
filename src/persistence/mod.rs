//! Append-only signal journal
//!
//! One JSON record per line, keyed by timestamp. This is the external log
//! collaborator: the pipeline only builds the payload, the journal decides
//! where it lands. The core never reads it back during evaluation.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::SignalError;
use crate::models::SignalRecord;

pub struct SignalJournal {
    path: PathBuf,
}

impl SignalJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the journal
    pub fn append(&self, record: &SignalRecord) -> Result<(), SignalError> {
        let mut line = serde_json::to_string(record).map_err(io::Error::other)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::debug!(
            "Journaled {:?} signal at {:.1}% confidence",
            record.signal,
            record.confidence_pct
        );
        Ok(())
    }

    /// Read every journaled record, oldest first
    pub fn read_all(&self) -> Result<Vec<SignalRecord>, SignalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for line in raw.lines().filter(|line| !line.trim().is_empty()) {
            records.push(serde_json::from_str(line).map_err(io::Error::other)?);
        }
        Ok(records)
    }

    /// Drop every record
    pub fn clear(&self) -> Result<(), SignalError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
