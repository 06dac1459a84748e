//! Batch report: the partial-failure contract
//!
//! The report tells the queue platform exactly which records to
//! redeliver: `batchItemFailures` carries the failed ids, no more, no
//! less, and is omitted entirely when the whole batch succeeded.

use chrono::{DateTime, Utc};
use relay_routing::ActionOutcome;
use serde::{Deserialize, Serialize};

/// A record that processed successfully
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRecord {
    pub id: String,
    pub processed_at: DateTime<Utc>,
    pub notification_type: String,
    pub result: ActionOutcome,
}

/// A record that failed, with the captured error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub id: String,
    pub error: String,
}

/// Pointer the queue platform uses to redeliver one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}

/// Outcome of one batch dispatch; both lists preserve input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
    pub successful_messages: Vec<SuccessRecord>,
    pub failed_messages: Vec<FailureRecord>,
    #[serde(
        rename = "batchItemFailures",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub batch_item_failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a success, keeping counts in step
    pub fn record_success(&mut self, entry: SuccessRecord) {
        self.processed += 1;
        self.successful_messages.push(entry);
    }

    /// Append a failure; the id also lands in `batchItemFailures`
    pub fn record_failure(&mut self, id: impl Into<String>, error: impl Into<String>) {
        let id = id.into();
        self.failed += 1;
        self.batch_item_failures.push(ItemFailure {
            item_identifier: id.clone(),
        });
        self.failed_messages.push(FailureRecord {
            id,
            error: error.into(),
        });
    }

    /// True when nothing needs redelivery
    pub fn fully_successful(&self) -> bool {
        self.failed == 0
    }
}
