//! Batch dispatch: sequential per-record processing with isolation
//!
//! Records are processed independently in input order. A bad record
//! fails alone; a chat outage fails nothing. The dispatcher never
//! aborts mid-batch.

use std::sync::Arc;

use chrono::Utc;
use relay_chat::Notifier;
use relay_core::{ExtractError, Notification};
use relay_routing::{classify, ActionOutcome};
use uuid::Uuid;

use crate::record::QueueRecord;
use crate::report::{BatchReport, SuccessRecord};

/// Drives a batch of queue records through the pipeline.
pub struct BatchDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl BatchDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Process a batch in input order.
    pub async fn dispatch(&self, records: &[QueueRecord]) -> BatchReport {
        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, records = records.len(), "dispatching batch");

        let mut report = BatchReport::new();
        for record in records {
            match self.process_record(record).await {
                Ok(entry) => report.record_success(entry),
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "record failed");
                    report.record_failure(&record.id, err.to_string());
                }
            }
        }

        tracing::info!(
            %run_id,
            processed = report.processed,
            failed = report.failed,
            "batch complete"
        );
        report
    }

    /// Process one record: decode, classify, apply the business action,
    /// and deliver to chat when the decision calls for it.
    ///
    /// Only extraction can fail the record. Delivery is best-effort:
    /// its errors are logged and swallowed.
    async fn process_record(&self, record: &QueueRecord) -> Result<SuccessRecord, ExtractError> {
        tracing::debug!(id = %record.id, "processing record");

        let notification = Notification::from_body(&record.body)?;
        let envelope = notification.to_envelope();
        let decision = classify(&envelope);
        let outcome = ActionOutcome::apply(decision.category, &notification.details);

        if decision.delivers() && self.notifier.enabled() {
            if let Err(err) = self.notifier.notify(&envelope).await {
                tracing::warn!(id = %record.id, error = %err, "chat delivery failed");
            }
        }

        Ok(SuccessRecord {
            id: record.id.clone(),
            processed_at: Utc::now(),
            notification_type: notification.notification_type.clone(),
            result: outcome,
        })
    }
}
