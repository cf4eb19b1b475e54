//! Dedup and watermark tracking for examined records

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Tracks which records have been examined and the monitoring start time.
///
/// Record numbers are scoped per channel. The processed sets are append-only
/// for the process lifetime; record numbers are bounded-range per-channel
/// integers, so growth is slow relative to typical uptime.
#[derive(Debug)]
pub struct RecordTracker {
    /// Wall-clock watermark; records generated earlier are never candidates.
    start_time: DateTime<Utc>,
    /// Processed record numbers, keyed by channel name.
    processed: HashMap<String, HashSet<u64>>,
}

impl RecordTracker {
    /// Create a tracker with the given start watermark.
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            processed: HashMap::new(),
        }
    }

    /// The fixed start watermark.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Whether a record is new: generated at or after the start watermark and
    /// not yet marked for its channel.
    pub fn is_new(&self, channel: &str, record_number: u64, generated_at: DateTime<Utc>) -> bool {
        if generated_at < self.start_time {
            return false;
        }
        !self
            .processed
            .get(channel)
            .is_some_and(|records| records.contains(&record_number))
    }

    /// Mark a record as processed. There is no way to unmark.
    pub fn mark_processed(&mut self, channel: &str, record_number: u64) {
        self.processed
            .entry(channel.to_string())
            .or_default()
            .insert(record_number);
    }

    /// Total number of records marked across all channels.
    pub fn processed_count(&self) -> usize {
        self.processed.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn should_report_unseen_record_as_new() {
        // Arrange
        let start = Utc::now();
        let tracker = RecordTracker::new(start);

        // Act & Assert
        assert!(tracker.is_new("Security", 100, start + Duration::seconds(1)));
    }

    #[test]
    fn should_report_pre_start_record_as_not_new() {
        // Arrange
        let start = Utc::now();
        let tracker = RecordTracker::new(start);

        // Act & Assert - never marked, but generated before the watermark
        assert!(!tracker.is_new("Security", 100, start - Duration::seconds(1)));
    }

    #[test]
    fn should_accept_record_generated_exactly_at_start() {
        // Arrange
        let start = Utc::now();
        let tracker = RecordTracker::new(start);

        // Act & Assert
        assert!(tracker.is_new("Security", 100, start));
    }

    #[test]
    fn should_not_report_marked_record_as_new() {
        // Arrange
        let start = Utc::now();
        let mut tracker = RecordTracker::new(start);
        let generated = start + Duration::seconds(5);

        // Act
        tracker.mark_processed("Security", 100);

        // Assert
        assert!(!tracker.is_new("Security", 100, generated));
    }

    #[test]
    fn should_mark_idempotently() {
        // Arrange
        let start = Utc::now();
        let mut tracker = RecordTracker::new(start);

        // Act
        tracker.mark_processed("Security", 100);
        tracker.mark_processed("Security", 100);

        // Assert
        assert!(!tracker.is_new("Security", 100, start + Duration::seconds(1)));
        assert_eq!(tracker.processed_count(), 1);
    }

    #[test]
    fn should_scope_record_numbers_per_channel() {
        // Arrange
        let start = Utc::now();
        let mut tracker = RecordTracker::new(start);
        let generated = start + Duration::seconds(1);

        // Act - the same record number on a different channel is unrelated
        tracker.mark_processed("Security", 100);

        // Assert
        assert!(!tracker.is_new("Security", 100, generated));
        assert!(tracker.is_new("Application", 100, generated));
    }

    #[test]
    fn should_count_processed_records_across_channels() {
        // Arrange
        let mut tracker = RecordTracker::new(Utc::now());

        // Act
        tracker.mark_processed("Security", 1);
        tracker.mark_processed("Security", 2);
        tracker.mark_processed("Application", 1);

        // Assert
        assert_eq!(tracker.processed_count(), 3);
    }
}
