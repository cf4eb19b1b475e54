//! Log source boundary and the channel spool reader
//!
//! A source yields raw records in chronological batches; an empty batch
//! means "caught up for now", not an error. The shipped implementation reads
//! the newline-delimited JSON spool file the host export agent appends for
//! each channel.

use crate::event::RawEventRecord;
use crate::utils::AppError;
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result type for source operations
pub type SourceResult<T> = Result<T, AppError>;

/// Ordered batch-read primitive over a named log channel.
#[async_trait]
pub trait EventLogSource: Send + Sync {
    /// Name of the channel this source reads from.
    fn channel(&self) -> &str;

    /// Read the next batch of records in chronological order.
    ///
    /// An empty batch signals "caught up for now", not an error.
    async fn read_batch(&mut self) -> SourceResult<Vec<RawEventRecord>>;
}

/// Spool-file reader for one channel.
///
/// Records are JSON objects, one per line, appended to
/// `<spool_dir>/<Channel>.jsonl`. The reader keeps a byte cursor and only
/// consumes newline-terminated lines; a trailing partial line may still be
/// mid-write and is left for the next poll.
#[derive(Debug)]
pub struct ChannelSpoolSource {
    channel: String,
    path: PathBuf,
    cursor: u64,
}

impl ChannelSpoolSource {
    /// Create a reader for `channel` under `spool_dir`.
    ///
    /// The spool file does not have to exist yet; until it does, every batch
    /// is empty.
    pub fn new(channel: impl Into<String>, spool_dir: impl AsRef<Path>) -> Self {
        let channel = channel.into();
        let path = spool_dir.as_ref().join(format!("{}.jsonl", channel));
        Self {
            channel,
            path,
            cursor: 0,
        }
    }

    /// Spool file path for this channel.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_new_records(&mut self) -> SourceResult<Vec<RawEventRecord>> {
        if !self.path.exists() {
            debug!(channel = %self.channel, "Spool file does not exist yet");
            return Ok(vec![]);
        }

        let file = File::open(&self.path).map_err(|e| {
            AppError::source_read(format!(
                "Failed to open spool file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let len = file
            .metadata()
            .map_err(|e| AppError::source_read(format!("Failed to stat spool file: {}", e)))?
            .len();

        // A file shorter than the cursor was truncated or rotated.
        if len < self.cursor {
            info!(
                channel = %self.channel,
                previous_cursor = self.cursor,
                file_len = len,
                "Spool file truncated, resetting cursor"
            );
            self.cursor = 0;
        }

        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(self.cursor))
            .map_err(|e| AppError::source_read(format!("Failed to seek spool file: {}", e)))?;

        let mut records = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| AppError::source_read(format!("Failed to read spool line: {}", e)))?;
            if read == 0 {
                break;
            }
            if !line.ends_with('\n') {
                // Partial trailing line; the writer has not finished it.
                break;
            }

            self.cursor += read as u64;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<RawEventRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(channel = %self.channel, error = %e, "Skipping unparseable spool line");
                }
            }
        }

        if !records.is_empty() {
            debug!(channel = %self.channel, count = records.len(), "Read spool records");
        }

        Ok(records)
    }
}

#[async_trait]
impl EventLogSource for ChannelSpoolSource {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn read_batch(&mut self) -> SourceResult<Vec<RawEventRecord>> {
        self.read_new_records()
    }
}
