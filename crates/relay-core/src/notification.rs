//! Notification: the normalized unit derived from a raw record body
//!
//! Queue records arrive in three shapes: bus-delivered events (an object
//! with the payload under "detail"), custom notifications (any other
//! JSON object), and plain text. The first two normalize by extraction;
//! plain text is wrapped as an opaque payload rather than rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::{Envelope, UNKNOWN};
use crate::error::ExtractError;

/// Detail key holding the body of an undecodable record
pub const RAW_MESSAGE_KEY: &str = "raw_message";

/// Type assigned to records without an explicit one
pub const GENERIC_TYPE: &str = "notification";

/// Source assigned to records without an explicit one
pub const QUEUE_SOURCE: &str = "queue";

/// A normalized notification ready for routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Category name, mirrors the envelope's detail type
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Origin identifier
    pub source: String,
    /// Event time; now() when the record carries none
    pub timestamp: DateTime<Utc>,
    /// The original payload mapping, passed through unchanged
    pub details: Map<String, Value>,
}

impl Notification {
    /// Decode a raw record body.
    ///
    /// Text that is not JSON becomes an opaque notification and never
    /// fails. JSON that is not an object is an extraction error.
    pub fn from_body(body: &str) -> Result<Self, ExtractError> {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => {
                tracing::warn!("record body is not valid JSON, treating as plain text");
                Ok(Self::opaque(body))
            }
        }
    }

    /// Extract a notification from decoded JSON.
    pub fn from_value(value: Value) -> Result<Self, ExtractError> {
        let mut object = match value {
            Value::Object(map) => map,
            other => return Err(ExtractError::NotAnObject(json_kind(&other).to_string())),
        };

        match object.remove("detail") {
            // Bus-delivered event: payload lives under "detail"
            Some(Value::Object(detail)) => {
                let timestamp = object
                    .get("timestamp")
                    .or_else(|| object.get("time"))
                    .and_then(parse_timestamp)
                    .unwrap_or_else(Utc::now);
                Ok(Self {
                    notification_type: string_or(&object, "detail-type", UNKNOWN),
                    source: string_or(&object, "source", UNKNOWN),
                    timestamp,
                    details: detail,
                })
            }
            Some(other) => Err(ExtractError::NotAnObject(json_kind(&other).to_string())),
            // Custom notification: the whole object is the payload
            None => {
                let timestamp = object
                    .get("timestamp")
                    .and_then(parse_timestamp)
                    .unwrap_or_else(Utc::now);
                Ok(Self {
                    notification_type: string_or(&object, "type", GENERIC_TYPE),
                    source: string_or(&object, "source", QUEUE_SOURCE),
                    timestamp,
                    details: object,
                })
            }
        }
    }

    /// Wrap an undecodable body as an opaque notification
    pub fn opaque(body: impl Into<String>) -> Self {
        let mut details = Map::new();
        details.insert(RAW_MESSAGE_KEY.to_string(), Value::String(body.into()));
        Self {
            notification_type: GENERIC_TYPE.to_string(),
            source: QUEUE_SOURCE.to_string(),
            timestamp: Utc::now(),
            details,
        }
    }

    /// True when this notification was wrapped from plain text
    pub fn is_opaque(&self) -> bool {
        self.details.contains_key(RAW_MESSAGE_KEY)
    }

    /// Rebuild the envelope shape for downstream delivery
    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            source: self.source.clone(),
            detail_type: self.notification_type.clone(),
            detail: self.details.clone(),
        }
    }
}

fn string_or(object: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        _ => fallback.to_string(),
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bus_event_extraction() {
        let body = r#"{
            "source": "custom.orders",
            "detail-type": "Order Created",
            "time": "2024-03-01T12:00:00Z",
            "detail": { "orderId": "o-42", "message": "new order" }
        }"#;
        let notification = Notification::from_body(body).unwrap();
        assert_eq!(notification.notification_type, "Order Created");
        assert_eq!(notification.source, "custom.orders");
        assert_eq!(notification.timestamp.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert_eq!(notification.details.get("orderId"), Some(&json!("o-42")));
        assert!(!notification.is_opaque());
    }

    #[test]
    fn test_bus_event_missing_fields() {
        let notification = Notification::from_body(r#"{"detail": {}}"#).unwrap();
        assert_eq!(notification.notification_type, "unknown");
        assert_eq!(notification.source, "unknown");
        assert!(notification.details.is_empty());
    }

    #[test]
    fn test_custom_notification_keeps_whole_payload() {
        let body = r#"{"type": "deploy", "source": "ci", "status": "done"}"#;
        let notification = Notification::from_body(body).unwrap();
        assert_eq!(notification.notification_type, "deploy");
        assert_eq!(notification.source, "ci");
        assert_eq!(notification.details.get("status"), Some(&json!("done")));
        // type/source stay visible in the payload
        assert_eq!(notification.details.get("type"), Some(&json!("deploy")));
    }

    #[test]
    fn test_custom_notification_defaults() {
        let notification = Notification::from_body(r#"{"status": "done"}"#).unwrap();
        assert_eq!(notification.notification_type, "notification");
        assert_eq!(notification.source, "queue");
    }

    #[test]
    fn test_plain_text_becomes_opaque() {
        let notification = Notification::from_body("not json at all").unwrap();
        assert!(notification.is_opaque());
        assert_eq!(
            notification.details.get(RAW_MESSAGE_KEY),
            Some(&json!("not json at all"))
        );
        assert_eq!(notification.notification_type, "notification");
        assert_eq!(notification.source, "queue");
    }

    #[test]
    fn test_non_object_json_is_an_error() {
        for body in ["[1, 2, 3]", "\"hello\"", "42", "null", "true"] {
            let result = Notification::from_body(body);
            assert!(result.is_err(), "should reject: {}", body);
        }
    }

    #[test]
    fn test_non_object_detail_is_an_error() {
        let result = Notification::from_body(r#"{"detail": "oops"}"#);
        assert!(matches!(result, Err(ExtractError::NotAnObject(_))));
    }

    #[test]
    fn test_unparseable_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let notification =
            Notification::from_body(r#"{"detail": {}, "timestamp": "yesterday-ish"}"#).unwrap();
        assert!(notification.timestamp >= before);
    }

    #[test]
    fn test_to_envelope_round_trip() {
        let body = r#"{
            "source": "custom.auth",
            "detail-type": "Security Alert",
            "detail": { "message": "brute force", "ip": "10.0.0.9" }
        }"#;
        let envelope = Notification::from_body(body).unwrap().to_envelope();
        assert_eq!(envelope.source, "custom.auth");
        assert_eq!(envelope.detail_type, "Security Alert");
        assert_eq!(envelope.detail_str("ip"), Some("10.0.0.9"));
    }
}
