//! Record, kind table, and alert types for the monitoring pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored event kind with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoredKind {
    /// Numeric event identifier as emitted by the log channel.
    pub code: u32,
    /// Human-readable title used in alerts.
    pub title: &'static str,
    /// Insert field names the kind is expected to carry (documentation only,
    /// not consulted at runtime).
    pub fields: &'static [&'static str],
    /// Emoji marker prefixed to the alert title.
    pub marker: &'static str,
}

/// The fixed set of event kinds the monitor reacts to.
pub const MONITORED_KINDS: &[MonitoredKind] = &[
    MonitoredKind {
        code: 4624,
        title: "Successful Logon",
        fields: &["Account Name"],
        marker: "🟢",
    },
    MonitoredKind {
        code: 4625,
        title: "Failed Logon Attempt",
        fields: &["Account Name"],
        marker: "❌",
    },
    MonitoredKind {
        code: 4720,
        title: "User Account Created",
        fields: &["Target Account Name"],
        marker: "👤",
    },
    MonitoredKind {
        code: 4723,
        title: "Password Change Attempt",
        fields: &["Target Account Name"],
        marker: "🔑",
    },
    MonitoredKind {
        code: 4724,
        title: "Password Reset Attempt",
        fields: &["Target Account Name"],
        marker: "🔓",
    },
    MonitoredKind {
        code: 11707,
        title: "Application Installed",
        fields: &["Product"],
        marker: "📦",
    },
    MonitoredKind {
        code: 6416,
        title: "USB Device Inserted",
        fields: &["Device Name"],
        marker: "🔧",
    },
];

/// Look up a monitored kind by its numeric code.
pub fn monitored_kind(code: u32) -> Option<&'static MonitoredKind> {
    MONITORED_KINDS.iter().find(|kind| kind.code == code)
}

/// A raw record as produced by a log channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRecord {
    /// Numeric event kind.
    pub event_id: u32,
    /// Per-channel, monotonically increasing record number.
    pub record_number: u64,
    /// Generation timestamp (UTC).
    pub time_generated: DateTime<Utc>,
    /// Originating subsystem name.
    pub source_name: String,
    /// Ordered auxiliary string fields.
    #[serde(default)]
    pub string_inserts: Vec<String>,
}

/// A formatted alert, built for one delivery call and then discarded.
#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub code: u32,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub detail: String,
    pub marker: String,
}

impl Alert {
    /// Build the alert for a monitored record and its extracted detail text.
    pub fn new(kind: &MonitoredKind, record: &RawEventRecord, detail: impl Into<String>) -> Self {
        Self {
            title: kind.title.to_string(),
            code: kind.code,
            timestamp: record.time_generated,
            source: record.source_name.clone(),
            detail: detail.into(),
            marker: kind.marker.to_string(),
        }
    }
}
