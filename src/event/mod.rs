//! Event model for the monitoring pipeline
//!
//! This module defines the data the pipeline moves around:
//! - Raw records as read from a log channel
//! - The static table of monitored event kinds
//! - The transient alert handed to the notifier

mod event_types;

pub use event_types::{monitored_kind, Alert, MonitoredKind, RawEventRecord, MONITORED_KINDS};
