//! Per-kind detail extraction for monitored event records
//!
//! Pure functions mapping (event kind, string inserts) to a typed detail.
//! Only [`Detail::Found`] is notify-worthy; every other variant suppresses
//! notification.

use std::fmt;

/// Account names that never trigger a notification.
const IGNORED_ACCOUNTS: &[&str] = &[
    "SYSTEM",
    "NETWORK SERVICE",
    "LOCAL SERVICE",
    "ANONYMOUS LOGON",
    "DWM",
];

/// Insert index carrying the account name on logon records.
const LOGON_ACCOUNT_INDEX: usize = 5;

/// Insert index carrying the target account on account-mutation records.
const TARGET_ACCOUNT_INDEX: usize = 0;

/// Marker substring identifying the device-name insert on 6416 records.
const DEVICE_NAME_MARKER: &str = "DeviceName";

/// Typed result of detail extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    /// A notify-worthy detail line.
    Found(String),
    /// Value present but blank or on the ignored-accounts list.
    Ignored(String),
    /// The insert list is too short to carry the expected value.
    NotFound(String),
    /// A device-name insert was matched but yielded no name.
    Unknown(String),
    /// The kind is not monitored.
    Unavailable,
}

impl Detail {
    /// Whether this detail should be forwarded to the notifier.
    pub fn should_notify(&self) -> bool {
        matches!(self, Detail::Found(_))
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Found(text)
            | Detail::Ignored(text)
            | Detail::NotFound(text)
            | Detail::Unknown(text) => f.write_str(text),
            Detail::Unavailable => f.write_str("No details available."),
        }
    }
}

/// Extract the human-readable detail line for an event record.
///
/// Dispatches on the event kind; unrecognized kinds yield
/// [`Detail::Unavailable`]. Stable: the same input always produces the same
/// output.
pub fn extract_details(event_id: u32, inserts: &[String]) -> Detail {
    match event_id {
        4624 | 4625 => account_detail(inserts, LOGON_ACCOUNT_INDEX, "Account Name"),
        4720 | 4723 | 4724 => account_detail(inserts, TARGET_ACCOUNT_INDEX, "Target Account"),
        11707 => product_detail(inserts),
        6416 => device_detail(inserts),
        _ => Detail::Unavailable,
    }
}

/// Read a trimmed account name at `index`, applying the ignored-accounts
/// list. A missing insert yields `NotFound`.
fn account_detail(inserts: &[String], index: usize, label: &str) -> Detail {
    let Some(raw) = inserts.get(index) else {
        return Detail::NotFound(format!("{}: Not found", label));
    };

    let account = raw.trim();
    if account.is_empty() || IGNORED_ACCOUNTS.contains(&account) {
        Detail::Ignored(format!("{}: {} (ignored)", label, account))
    } else {
        Detail::Found(format!("{}: {}", label, account))
    }
}

/// Product name of an install record. No ignored-accounts check applies.
fn product_detail(inserts: &[String]) -> Detail {
    match inserts.first() {
        Some(product) => Detail::Found(format!("Installed Application: {}", product.trim())),
        None => Detail::NotFound("Installed Application: Not found".to_string()),
    }
}

/// Device name of a device-insertion record.
///
/// The first insert containing the `DeviceName` marker wins, and the name is
/// whatever follows its last colon (the whole insert if it has none). Both
/// rules hold even when the name itself contains a colon.
fn device_detail(inserts: &[String]) -> Detail {
    if inserts.is_empty() {
        return Detail::NotFound("Device Name: Not found".to_string());
    }

    let device = inserts
        .iter()
        .find(|insert| insert.contains(DEVICE_NAME_MARKER))
        .map(|insert| insert.rsplit(':').next().unwrap_or_default().trim());

    match device {
        Some(name) if !name.is_empty() => Detail::Found(format!("Device Name: {}", name)),
        _ => Detail::Unknown("Device Name: Unknown".to_string()),
    }
}
