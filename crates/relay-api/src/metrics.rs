//! Service counters exposed at `/metrics`.
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Counters for the ingest, delivery, and batch endpoints.
pub struct ApiMetrics {
    registry: Registry,
    pub events_total: IntCounter,
    pub forwards_total: IntCounter,
    pub notifications_total: IntCounter,
    pub batch_records_total: IntCounter,
    pub batch_failures_total: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            events_total: counter(
                &registry,
                "relay_events_total",
                "Events accepted on /v1/events",
            ),
            forwards_total: counter(
                &registry,
                "relay_forwards_total",
                "Events forwarded to chat delivery",
            ),
            notifications_total: counter(
                &registry,
                "relay_notifications_total",
                "Direct notifications on /v1/notify",
            ),
            batch_records_total: counter(
                &registry,
                "relay_batch_records_total",
                "Queue records received on /v1/batch",
            ),
            batch_failures_total: counter(
                &registry,
                "relay_batch_failures_total",
                "Queue records that failed processing",
            ),
            registry,
        }
    }

    /// Render every counter in the text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// Static names in a fresh registry: registration cannot fail.
fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("valid counter name");
    registry
        .register(Box::new(counter.clone()))
        .expect("unique counter name");
    counter
}
