//! Binary entrypoint for the relay API server.
use std::time::Duration;

use relay_api::run;
use relay_core::RelayConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Default listen address can be overridden with RELAY_ADDR
    let addr = std::env::var("RELAY_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());

    let mut config = RelayConfig::new();
    if let Ok(url) = std::env::var("RELAY_WEBHOOK_URL") {
        config = config.with_webhook_url(url);
    }
    if let Ok(name) = std::env::var("RELAY_BOT_NAME") {
        config = config.with_bot_name(name);
    }
    if let Ok(secs) = std::env::var("RELAY_TIMEOUT_SECS") {
        if let Ok(secs) = secs.parse() {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
    }

    run(&addr, config).await;
}
