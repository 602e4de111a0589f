// Connection data model
//
// Records arrive from the connection feed as JSON. Nothing here is
// interpreted beyond the status label and the local endpoint; every other
// field is kept as-is for display.

pub mod feed;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// TCP connection states as reported by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Established,
    Listen,
    CloseWait,
    SynSent,
    SynRecv,
    FinWait1,
    FinWait2,
    TimeWait,
    Closing,
    LastAck,
    Unknown,
}

impl ConnectionState {
    /// Every recognized state, in legend order
    pub const KNOWN: [ConnectionState; 10] = [
        ConnectionState::Established,
        ConnectionState::Listen,
        ConnectionState::CloseWait,
        ConnectionState::SynSent,
        ConnectionState::SynRecv,
        ConnectionState::FinWait1,
        ConnectionState::FinWait2,
        ConnectionState::TimeWait,
        ConnectionState::Closing,
        ConnectionState::LastAck,
    ];

    /// Parse a status label. Matching is exact; anything else is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "ESTABLISHED" => ConnectionState::Established,
            "LISTEN" => ConnectionState::Listen,
            "CLOSE_WAIT" => ConnectionState::CloseWait,
            "SYN_SENT" => ConnectionState::SynSent,
            "SYN_RECV" => ConnectionState::SynRecv,
            "FIN_WAIT1" => ConnectionState::FinWait1,
            "FIN_WAIT2" => ConnectionState::FinWait2,
            "TIME_WAIT" => ConnectionState::TimeWait,
            "CLOSING" => ConnectionState::Closing,
            "LAST_ACK" => ConnectionState::LastAck,
            _ => ConnectionState::Unknown,
        }
    }

    /// Wire label for this state (`None` for `Unknown`)
    pub fn label(self) -> Option<&'static str> {
        match self {
            ConnectionState::Established => Some("ESTABLISHED"),
            ConnectionState::Listen => Some("LISTEN"),
            ConnectionState::CloseWait => Some("CLOSE_WAIT"),
            ConnectionState::SynSent => Some("SYN_SENT"),
            ConnectionState::SynRecv => Some("SYN_RECV"),
            ConnectionState::FinWait1 => Some("FIN_WAIT1"),
            ConnectionState::FinWait2 => Some("FIN_WAIT2"),
            ConnectionState::TimeWait => Some("TIME_WAIT"),
            ConnectionState::Closing => Some("CLOSING"),
            ConnectionState::LastAck => Some("LAST_ACK"),
            ConnectionState::Unknown => None,
        }
    }
}

/// A single connection as reported by the feed
///
/// Records carry no identifier. Two records with equal fields are the same
/// record as far as the rest of the program is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub status: String,

    #[serde(default)]
    pub local_address: String,

    #[serde(default)]
    pub local_port: u16,

    /// Fields the feed sends that we don't interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConnectionRecord {
    pub fn new(status: &str, local_address: &str, local_port: u16) -> Self {
        Self {
            status: status.to_string(),
            local_address: local_address.to_string(),
            local_port,
            extra: serde_json::Map::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_label(&self.status)
    }

    /// Format record for display
    pub fn format_display(&self) -> String {
        format!(
            "Status: {}, Local IP: {}, Local Port: {}",
            self.status, self.local_address, self.local_port
        )
    }
}

/// One complete poll result. Replaces the previous snapshot wholesale.
#[derive(Debug, Clone)]
pub struct ConnectionSnapshot {
    pub records: Vec<ConnectionRecord>,
    pub received_at: Instant,
}

impl ConnectionSnapshot {
    pub fn new(records: Vec<ConnectionRecord>) -> Self {
        Self {
            records,
            received_at: Instant::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-status totals for the legend, keyed by the raw status label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: BTreeMap<String, usize>,
}

impl StatusCounts {
    /// Count for a raw status label (0 when absent)
    pub fn get(&self, status: &str) -> usize {
        self.counts.get(status).copied().unwrap_or(0)
    }

    /// Catch-all bucket: every record whose status is not a known state
    pub fn other(&self) -> usize {
        self.counts
            .iter()
            .filter(|(status, _)| ConnectionState::from_label(status) == ConnectionState::Unknown)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(status, count)| (status.as_str(), *count))
    }
}

/// Fold records into per-status counts. Independent of any active filter.
pub fn count_by_status(records: &[ConnectionRecord]) -> StatusCounts {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status.clone()).or_insert(0) += 1;
    }
    StatusCounts { counts }
}
