//! Business action application
//!
//! Applying a decision's action to the payload yields the per-record
//! processing result: the action tag plus whatever entity references
//! the payload carries for that category. Missing references are never
//! errors; the payload is loose by contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::{Action, EventCategory};

/// Result of applying the business action for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub status: String,
    pub processed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionOutcome {
    fn new(action: Action) -> Self {
        Self {
            action,
            status: "processed".to_string(),
            processed_at: Utc::now(),
            user_id: None,
            email: None,
            order_id: None,
            payment_id: None,
            amount: None,
            error: None,
        }
    }

    /// Apply the action for a category to an event payload.
    pub fn apply(category: EventCategory, details: &Map<String, Value>) -> Self {
        let mut outcome = Self::new(category.action());

        match category {
            EventCategory::UserRegistered => {
                outcome.user_id = string_field(details, &["userId", "user_id"]);
                outcome.email = string_field(details, &["email"]);
                tracing::info!(user_id = ?outcome.user_id, "processing user registration");
            }
            EventCategory::OrderCreated => {
                outcome.order_id = string_field(details, &["orderId", "order_id"]);
                tracing::info!(order_id = ?outcome.order_id, "processing order");
            }
            EventCategory::PaymentFailed => {
                outcome.payment_id = string_field(details, &["paymentId", "payment_id"]);
                outcome.amount = details.get("amount").cloned();
                tracing::info!(payment_id = ?outcome.payment_id, "notifying support of failed payment");
            }
            EventCategory::Error | EventCategory::Failure => {
                outcome.error = string_field(details, &["message", "error"]);
                tracing::info!(error = ?outcome.error, "logging error event");
            }
            EventCategory::SecurityAlert | EventCategory::Unclassified => {
                tracing::info!(action = %outcome.action, "logging event");
            }
        }

        outcome
    }
}

/// First string value found under any of the given keys
fn string_field(details: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| details.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}
