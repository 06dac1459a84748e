//! API Handlers
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use relay_chat::dispatch;
use relay_core::{envelope::UNKNOWN, Envelope, RELAY_VERSION};
use relay_queue::{BatchDispatcher, BatchReport, QueueBatch};
use relay_routing::{classify, ActionOutcome};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

/// Ingest one bus event: classify it, apply the business action, and
/// forward to chat when the routing decision calls for it.
///
/// A payload that does not fit the envelope shape gets a 500 and raises
/// a high-priority error notification of its own.
pub async fn events(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.metrics.events_total.inc();

    let envelope: Envelope = match serde_json::from_value(payload.clone()) {
        Ok(envelope) => envelope,
        Err(err) => return event_failure(&state, err.to_string(), &payload),
    };

    let decision = classify(&envelope);
    tracing::info!(
        source = %envelope.source,
        detail_type = %envelope.detail_type,
        route = %decision.route,
        "event accepted"
    );

    let result = ActionOutcome::apply(decision.category, &envelope.detail);
    if decision.delivers() {
        state.metrics.forwards_total.inc();
        dispatch(&state.notifier, &envelope);
    }

    (
        StatusCode::OK,
        Json(json!({
            "message": "Event processed successfully",
            "source": envelope.source,
            "type": envelope.detail_type,
            "result": result,
        })),
    )
}

/// Format and deliver one envelope to the chat webhook.
pub async fn notify(
    State(state): State<AppState>,
    Json(envelope): Json<Envelope>,
) -> (StatusCode, Json<Value>) {
    state.metrics.notifications_total.inc();

    match state.notifier.notify(&envelope).await {
        Ok(delivery) => {
            tracing::info!(
                status = delivery.status,
                detail_type = %envelope.detail_type,
                "notification sent"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Notification sent successfully",
                    "detail_type": envelope.detail_type,
                })),
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "notification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
        }
    }
}

/// Process a batch of queue records. Answers 207 Multi-Status when some
/// records failed, so callers know to inspect `batchItemFailures`.
pub async fn batch(
    State(state): State<AppState>,
    Json(payload): Json<QueueBatch>,
) -> (StatusCode, Json<BatchReport>) {
    state
        .metrics
        .batch_records_total
        .inc_by(payload.records.len() as u64);

    let dispatcher = BatchDispatcher::new(Arc::clone(&state.notifier));
    let report = dispatcher.dispatch(&payload.records).await;
    state.metrics.batch_failures_total.inc_by(report.failed as u64);

    let status = if report.fully_successful() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    (status, Json(report))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": RELAY_VERSION })),
    )
}

/// Prometheus exposition for the service counters.
pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(body) => (StatusCode::OK, body),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Answer a failed ingest and raise a best-effort error notification.
fn event_failure(state: &AppState, error: String, original: &Value) -> (StatusCode, Json<Value>) {
    tracing::error!(error = %error, "event processing failed");
    dispatch(&state.notifier, &error_envelope(&error, original));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error })),
    )
}

/// High-priority notification describing a processing failure.
fn error_envelope(error: &str, original: &Value) -> Envelope {
    let original_event = match original {
        Value::Object(map) => map
            .get("detail-type")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN)
            .to_string(),
        other => other.to_string(),
    };
    Envelope::new("relay.events", "Error")
        .with_detail("message", json!(format!("Event processing failed: {error}")))
        .with_detail("priority", json!("high"))
        .with_detail("error", json!(error))
        .with_detail("original_event", json!(original_event))
        .with_detail("timestamp", json!(Utc::now().to_rfc3339()))
}
