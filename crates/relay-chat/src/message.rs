//! Chat message formatting
//!
//! Converts an envelope into the webhook wire shape: a bold headline,
//! one attachment with a severity color, and ordered key/value fields
//! drawn from the payload.

use chrono::Utc;
use relay_core::Envelope;
use relay_routing::Priority;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Footer stamped on every attachment
pub const FOOTER: &str = "Notification Service";

/// Body fallback when the payload carries no message
pub const NO_MESSAGE: &str = "No message provided";

/// Severity color attached to a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Red: escalations and failures
    #[serde(rename = "danger")]
    Danger,
    /// Orange: high priority and warnings
    #[serde(rename = "warning")]
    Warning,
    /// Green: successes
    #[serde(rename = "good")]
    Good,
    /// Neutral fallback
    #[serde(rename = "#36a64f")]
    Default,
}

impl Color {
    /// Pick the color for an event. First match wins: priority rules
    /// precede type-keyword rules, so a critical "Success" is danger.
    pub fn for_event(envelope: &Envelope) -> Self {
        let priority = Priority::of(envelope);
        if priority.is_escalation() {
            return Color::Danger;
        }
        if priority == Priority::High {
            return Color::Warning;
        }

        let type_lower = envelope.detail_type.to_lowercase();
        if ["error", "failure", "failed"].iter().any(|word| type_lower.contains(word)) {
            Color::Danger
        } else if ["warning", "alert"].iter().any(|word| type_lower.contains(word)) {
            Color::Warning
        } else if ["success", "completed"].iter().any(|word| type_lower.contains(word)) {
            Color::Good
        } else {
            Color::Default
        }
    }

    /// The wire value for this color
    pub fn code(&self) -> &'static str {
        match self {
            Color::Danger => "danger",
            Color::Warning => "warning",
            Color::Good => "good",
            Color::Default => "#36a64f",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One key/value pair rendered in an attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    /// Values shorter than this render side by side in the chat client
    const SHORT_LIMIT: usize = 40;

    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let short = value.chars().count() < Self::SHORT_LIMIT;
        Self {
            title: title.into(),
            value,
            short,
        }
    }

    /// A field that renders side by side regardless of value length.
    ///
    /// The named fields (Source, Priority, Timestamp) are always short;
    /// the length rule applies only to the free-form payload keys.
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }
}

/// A single rich block within a chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: Color,
    pub text: String,
    pub fields: Vec<Field>,
    pub footer: String,
    pub ts: i64,
}

/// The full webhook payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub username: String,
    pub attachments: Vec<Attachment>,
}

impl ChatMessage {
    /// Format an envelope into the webhook wire shape.
    ///
    /// Never fails: missing payload fields fall back to defaults.
    pub fn build(envelope: &Envelope, bot_name: &str) -> Self {
        let body = envelope
            .detail
            .get("message")
            .map(stringify)
            .unwrap_or_else(|| NO_MESSAGE.to_string());

        Self {
            text: format!("*{}*", envelope.detail_type),
            username: bot_name.to_string(),
            attachments: vec![Attachment {
                color: Color::for_event(envelope),
                text: body,
                fields: build_fields(envelope),
                footer: FOOTER.to_string(),
                ts: Utc::now().timestamp(),
            }],
        }
    }
}

/// Payload keys rendered as the body or as dedicated fields
const EXCLUDED_KEYS: [&str; 3] = ["message", "priority", "timestamp"];

/// Build the ordered field list for an envelope.
///
/// Source always comes first, then Priority and Timestamp when the
/// payload carries them, then every remaining key in insertion order.
/// Underscore-prefixed keys are private and skipped.
fn build_fields(envelope: &Envelope) -> Vec<Field> {
    let mut fields = vec![Field::short("Source", envelope.source.clone())];

    if let Some(priority) = envelope.detail.get("priority") {
        let value = stringify(priority);
        if !value.is_empty() {
            fields.push(Field::short("Priority", value.to_uppercase()));
        }
    }

    if let Some(timestamp) = envelope.detail.get("timestamp") {
        let value = stringify(timestamp);
        if !value.is_empty() {
            fields.push(Field::short("Timestamp", value));
        }
    }

    for (key, value) in &envelope.detail {
        if EXCLUDED_KEYS.contains(&key.as_str()) || key.starts_with('_') {
            continue;
        }
        fields.push(Field::new(titleize(key), stringify(value)));
    }

    fields
}

/// String values verbatim; everything else via its JSON rendering
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Field title from a payload key: "payment_id" → "Payment Id"
fn titleize(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
