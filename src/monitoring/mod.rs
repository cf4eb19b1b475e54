//! Security event log monitoring pipeline
//!
//! This module provides the polling pipeline:
//! - Log channel sources and the spool-file reader
//! - Dedup/watermark tracking of examined records
//! - Per-kind detail extraction
//! - Discord webhook notifications
//! - The fast-forward-then-poll monitor loop

pub mod discord_alert;
pub mod extractor;
pub mod monitor;
pub mod source;
pub mod tracker;

pub use discord_alert::DiscordAlert;
pub use extractor::{extract_details, Detail};
pub use monitor::EventLogMonitor;
pub use source::{ChannelSpoolSource, EventLogSource};
pub use tracker::RecordTracker;
