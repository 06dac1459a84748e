//! Relay API /v1: REST endpoints
//!
//! HTTP surface over the relay pipeline: event ingest, direct
//! notification delivery, queue batch processing, health, and metrics.

pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use relay_chat::{Notifier, WebhookNotifier};
use relay_core::RelayConfig;
use tower_http::trace::TraceLayer;

use crate::metrics::ApiMetrics;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    /// Wire the webhook notifier from configuration.
    pub fn new(config: RelayConfig) -> Self {
        let notifier = Arc::new(WebhookNotifier::new(&config));
        Self::with_notifier(config, notifier)
    }

    /// Substitute a custom delivery channel.
    pub fn with_notifier(config: RelayConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            notifier,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

pub async fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(handlers::events))
        .route("/v1/notify", post(handlers::notify))
        .route("/v1/batch", post(handlers::batch))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str, config: RelayConfig) {
    if config.delivery_configured() {
        tracing::info!(bot = %config.bot_name, "chat delivery enabled");
    } else {
        tracing::warn!("no webhook configured, chat delivery disabled");
    }

    let app = create_app(AppState::new(config)).await;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("relay API listening on {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
