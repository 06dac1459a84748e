//! Integration tests for batch dispatch semantics.
//!
//! A recording notifier stands in for the webhook so delivery behavior
//! can be asserted without any network infrastructure.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relay_chat::{Delivery, DeliveryError, Notifier};
use relay_core::Envelope;
use relay_queue::{BatchDispatcher, QueueRecord};
use relay_routing::Action;

/// Test double: records every envelope and answers with a fixed result.
struct RecordingNotifier {
    delivered: Mutex<Vec<Envelope>>,
    enabled: bool,
    fail: bool,
}

impl RecordingNotifier {
    fn healthy() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
            enabled: true,
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
            enabled: true,
            fail: true,
        })
    }

    fn disabled() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
            enabled: false,
            fail: false,
        })
    }

    fn deliveries(&self) -> Vec<Envelope> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn notify(&self, envelope: &Envelope) -> Result<Delivery, DeliveryError> {
        self.delivered.lock().unwrap().push(envelope.clone());
        if self.fail {
            Err(DeliveryError::Status {
                status: 503,
                body: "chat is down".to_string(),
            })
        } else {
            Ok(Delivery {
                status: 200,
                body: "ok".to_string(),
            })
        }
    }
}

// =============================================================================
// Partial-Failure Isolation
// =============================================================================

#[tokio::test]
async fn test_mixed_batch_isolates_failures() {
    let notifier = RecordingNotifier::healthy();
    let dispatcher = BatchDispatcher::new(notifier);

    let records = [
        QueueRecord::new(
            "m-1",
            r#"{"source": "custom.app", "detail-type": "Status Update", "detail": {"message": "fine"}}"#,
        ),
        // not JSON: wrapped as opaque, still succeeds
        QueueRecord::new("m-2", "%%% not json %%%"),
        // JSON of the wrong shape: a record-level failure
        QueueRecord::new("m-3", "[1, 2, 3]"),
    ];

    let report = dispatcher.dispatch(&records).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.failed, 1);

    let succeeded: Vec<&str> = report.successful_messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(succeeded, ["m-1", "m-2"]);

    let failed: Vec<&str> = report.failed_messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(failed, ["m-3"]);

    let retry: Vec<&str> = report
        .batch_item_failures
        .iter()
        .map(|f| f.item_identifier.as_str())
        .collect();
    assert_eq!(retry, ["m-3"]);
}

#[tokio::test]
async fn test_never_aborts_mid_batch() {
    let notifier = RecordingNotifier::healthy();
    let dispatcher = BatchDispatcher::new(notifier);

    let records = [
        QueueRecord::new("m-1", r#"{"status": "ok"}"#),
        QueueRecord::new("m-2", "\"just a string\""),
        QueueRecord::new("m-3", r#"{"status": "ok"}"#),
        QueueRecord::new("m-4", "42"),
        QueueRecord::new("m-5", r#"{"status": "ok"}"#),
    ];

    let report = dispatcher.dispatch(&records).await;

    let succeeded: Vec<&str> = report.successful_messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(succeeded, ["m-1", "m-3", "m-5"]);

    let retry: Vec<&str> = report
        .batch_item_failures
        .iter()
        .map(|f| f.item_identifier.as_str())
        .collect();
    assert_eq!(retry, ["m-2", "m-4"]);
}

#[tokio::test]
async fn test_failure_error_messages_are_captured() {
    let dispatcher = BatchDispatcher::new(RecordingNotifier::healthy());
    let records = [QueueRecord::new("m-1", "[]")];

    let report = dispatcher.dispatch(&records).await;
    assert_eq!(report.failed, 1);
    assert!(
        report.failed_messages[0].error.contains("not a JSON object"),
        "got: {}",
        report.failed_messages[0].error
    );
}

#[tokio::test]
async fn test_empty_batch() {
    let dispatcher = BatchDispatcher::new(RecordingNotifier::healthy());
    let report = dispatcher.dispatch(&[]).await;

    assert_eq!(report.processed, 0);
    assert_eq!(report.failed, 0);
    assert!(report.fully_successful());

    let wire = serde_json::to_value(&report).unwrap();
    assert!(wire.get("batchItemFailures").is_none());
}

// =============================================================================
// Best-Effort Delivery
// =============================================================================

#[tokio::test]
async fn test_chat_outage_never_fails_records() {
    let notifier = RecordingNotifier::failing();
    let dispatcher = BatchDispatcher::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let records = [QueueRecord::new(
        "m-1",
        r#"{"source": "custom.app", "detail-type": "Status Update", "detail": {"priority": "high"}}"#,
    )];

    let report = dispatcher.dispatch(&records).await;

    // delivery was attempted and failed, yet the record succeeded
    assert_eq!(notifier.deliveries().len(), 1);
    assert!(report.fully_successful());
    assert_eq!(report.successful_messages[0].id, "m-1");
}

#[tokio::test]
async fn test_only_qualifying_records_are_delivered() {
    let notifier = RecordingNotifier::healthy();
    let dispatcher = BatchDispatcher::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let records = [
        QueueRecord::new(
            "m-1",
            r#"{"source": "custom.app", "detail-type": "Error", "detail": {"message": "boom"}}"#,
        ),
        QueueRecord::new(
            "m-2",
            r#"{"source": "custom.app", "detail-type": "Status Update", "detail": {"message": "calm"}}"#,
        ),
    ];

    let report = dispatcher.dispatch(&records).await;
    assert_eq!(report.processed, 2);

    let deliveries = notifier.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].detail_type, "Error");
}

#[tokio::test]
async fn test_disabled_notifier_is_never_invoked() {
    let notifier = RecordingNotifier::disabled();
    let dispatcher = BatchDispatcher::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let records = [QueueRecord::new(
        "m-1",
        r#"{"source": "custom.app", "detail-type": "Error", "detail": {"message": "boom"}}"#,
    )];

    let report = dispatcher.dispatch(&records).await;
    assert!(report.fully_successful());
    assert!(notifier.deliveries().is_empty());
}

// =============================================================================
// Record Results
// =============================================================================

#[tokio::test]
async fn test_opaque_record_processed_as_generic() {
    let notifier = RecordingNotifier::healthy();
    let dispatcher = BatchDispatcher::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let records = [QueueRecord::new("m-1", "plain text alarm")];
    let report = dispatcher.dispatch(&records).await;

    let entry = &report.successful_messages[0];
    assert_eq!(entry.notification_type, "notification");
    assert_eq!(entry.result.action, Action::LogEvent);
    assert!(notifier.deliveries().is_empty());
}

#[tokio::test]
async fn test_entity_refs_flow_into_results() {
    let notifier = RecordingNotifier::healthy();
    let dispatcher = BatchDispatcher::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let records = [
        QueueRecord::new(
            "m-1",
            r#"{"source": "custom.shop", "detail-type": "Order Created", "detail": {"orderId": "o-9"}}"#,
        ),
        QueueRecord::new(
            "m-2",
            r#"{"source": "custom.pay", "detail-type": "Payment Failed", "detail": {"paymentId": "p-3", "amount": 12.5}}"#,
        ),
    ];

    let report = dispatcher.dispatch(&records).await;

    let order = &report.successful_messages[0].result;
    assert_eq!(order.action, Action::ProcessOrder);
    assert_eq!(order.order_id.as_deref(), Some("o-9"));

    let payment = &report.successful_messages[1].result;
    assert_eq!(payment.action, Action::NotifySupport);
    assert_eq!(payment.payment_id.as_deref(), Some("p-3"));
    assert_eq!(payment.amount, Some(serde_json::json!(12.5)));

    // only the failed payment forwards to chat
    let deliveries = notifier.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].detail_type, "Payment Failed");
}

#[tokio::test]
async fn test_custom_format_notification() {
    let dispatcher = BatchDispatcher::new(RecordingNotifier::healthy());
    let records = [QueueRecord::new("m-1", r#"{"type": "deploy", "source": "ci"}"#)];

    let report = dispatcher.dispatch(&records).await;
    assert_eq!(report.successful_messages[0].notification_type, "deploy");
}
