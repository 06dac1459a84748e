//! Priority levels carried in event payloads
//!
//! Parsed from `detail.priority`, case-insensitively. An absent or
//! unrecognized value is Normal.

use relay_core::Envelope;
use serde::{Deserialize, Serialize};

/// Priority of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Absent or unrecognized
    #[default]
    Normal = 0,
    /// Forwarded to chat
    High = 1,
    /// Forwarded and escalated
    Critical = 2,
    /// Forwarded and escalated
    Urgent = 3,
}

impl Priority {
    /// Parse a raw priority value, case-insensitively
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "high" => Priority::High,
            "critical" => Priority::Critical,
            "urgent" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }

    /// Priority carried by an envelope's payload.
    ///
    /// A non-string priority value is treated as absent.
    pub fn of(envelope: &Envelope) -> Self {
        envelope
            .detail_str("priority")
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Check if this priority alone forwards the event to chat
    pub fn triggers_forward(&self) -> bool {
        matches!(self, Priority::High | Priority::Critical | Priority::Urgent)
    }

    /// Check if this priority escalates the event
    pub fn is_escalation(&self) -> bool {
        matches!(self, Priority::Critical | Priority::Urgent)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Priority::Normal => write!(f, "NORMAL"),
            Priority::High => write!(f, "HIGH"),
            Priority::Critical => write!(f, "CRITICAL"),
            Priority::Urgent => write!(f, "URGENT"),
        }
    }
}
