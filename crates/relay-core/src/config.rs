//! Runtime configuration, assembled once at the process boundary
//!
//! Nothing in the pipeline reads the process environment; the binary
//! builds one of these at startup and passes it into constructors.

use std::time::Duration;

use crate::error::ConfigError;

/// Display name attached to outgoing chat messages by default
pub const DEFAULT_BOT_NAME: &str = "Notification Bot";

/// Settings shared by the delivery and service layers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Webhook endpoint for chat delivery; None disables delivery
    pub webhook_url: Option<String>,
    /// Display name attached to outgoing chat messages
    pub bot_name: String,
    /// Timeout applied to each outbound delivery call
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            bot_name: DEFAULT_BOT_NAME.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delivery webhook
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the bot display name
    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// Set the outbound call timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// True when chat delivery can be attempted at all
    pub fn delivery_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// The webhook URL, or the configuration error surfaced to callers
    pub fn require_webhook(&self) -> Result<&str, ConfigError> {
        self.webhook_url.as_deref().ok_or(ConfigError::MissingWebhook)
    }
}
