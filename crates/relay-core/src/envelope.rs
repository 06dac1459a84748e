//! Event Envelope: the external input shape
//!
//! Events arrive as loose JSON from the bus or queue. Missing fields
//! never fail deserialization; they fall back to sentinel values so
//! every payload can be classified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel for a missing source or type
pub const UNKNOWN: &str = "unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// An inbound event as delivered by the bus or queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Origin identifier (ex: "custom.orders")
    #[serde(default = "unknown")]
    pub source: String,
    /// Free-form category name (ex: "Order Created")
    #[serde(rename = "detail-type", default = "unknown")]
    pub detail_type: String,
    /// Event payload; key iteration order is insertion order
    #[serde(default)]
    pub detail: Map<String, Value>,
}

impl Envelope {
    /// Create an envelope with an empty payload
    pub fn new(source: impl Into<String>, detail_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail: Map::new(),
        }
    }

    /// Add one payload entry, preserving insertion order
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.detail.insert(key.into(), value);
        self
    }

    /// Payload value for a key, if it is a string
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.detail.get(key).and_then(Value::as_str)
    }

    /// The human-readable message carried by the payload
    pub fn message(&self) -> Option<&str> {
        self.detail_str("message")
    }

    /// True when the envelope carries nothing to act on
    pub fn is_blank(&self) -> bool {
        self.source == UNKNOWN && self.detail_type == UNKNOWN && self.detail.is_empty()
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }
}
