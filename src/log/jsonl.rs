//! JSONL (JSON Lines) logging of tick history
//!
//! Provides append-only logging of emitted ticks to `.tickseq/log.jsonl`.
//! The log is history for inspection, not persisted counter state: the
//! sequencer always starts from an empty store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::sequencer::Mode;

/// One emitted tick, as recorded in the log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickRecord {
    /// The tick number within the run (1-indexed)
    pub tick: u32,
    /// Name of the sequence definition that was driven
    pub sequence: String,
    /// Resolved state key the counter lives under
    pub state_key: String,
    /// Advance mode used for this tick
    pub mode: Mode,
    /// The emitted value
    pub value: i64,
    /// Completed-cycle count reported with the value
    pub cycle: u64,
    /// ISO 8601 timestamp of when the tick was emitted
    pub timestamp: DateTime<Utc>,
}

/// JSONL logger for tick history
///
/// Provides append-only logging to `<log_dir>/log.jsonl`.
/// Each line is a JSON object representing a single emitted tick.
pub struct JsonlLogger {
    log_path: PathBuf,
}

impl JsonlLogger {
    /// Create a new JSONL logger
    ///
    /// # Arguments
    /// * `log_dir` - Directory where log.jsonl will be stored (typically `.tickseq`)
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log.jsonl");

        Ok(Self { log_path })
    }

    /// Append a tick record to the log
    ///
    /// # Errors
    /// Returns an error if the log file cannot be opened, the record
    /// cannot be serialized, or the write fails.
    pub fn append(&self, record: &TickRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json =
            serde_json::to_string(record).context("Failed to serialize tick record to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all tick records from the log, in chronological order
    ///
    /// # Errors
    /// Returns an error if the log file cannot be read or any line fails
    /// to parse as JSON.
    pub fn read_all(&self) -> Result<Vec<TickRecord>> {
        // If log file doesn't exist yet, return empty vector
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut records = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let record: TickRecord = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            records.push(record);
        }

        Ok(records)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
