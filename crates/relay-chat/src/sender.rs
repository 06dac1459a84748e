//! Webhook delivery
//!
//! One POST per message, bounded by the configured timeout. The sender
//! never retries; callers decide whether a failure is fatal.

use std::time::Duration;

use relay_core::{ConfigError, RelayConfig};
use thiserror::Error;

use crate::message::ChatMessage;

/// A completed delivery: the endpoint's status and raw response body
#[derive(Debug, Clone)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
}

/// Failure to deliver a chat message
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The endpoint answered with a non-success status
    #[error("chat endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never completed
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Delivery was attempted without a configured webhook
    #[error("chat delivery not configured")]
    NotConfigured,
}

/// Delivers formatted messages to the configured webhook.
#[derive(Debug, Clone)]
pub struct ChatSender {
    client: reqwest::Client,
    webhook_url: String,
    timeout: Duration,
}

impl ChatSender {
    /// Build a sender from configuration.
    ///
    /// A missing webhook URL is the only construction failure, surfaced
    /// before anything is delivered.
    pub fn new(config: &RelayConfig) -> Result<Self, ConfigError> {
        let webhook_url = config.require_webhook()?.to_string();
        Ok(Self {
            client: reqwest::Client::new(),
            webhook_url,
            timeout: config.request_timeout,
        })
    }

    /// Deliver one message.
    ///
    /// A success status yields the response; any other status or a
    /// transport fault is a `DeliveryError`.
    pub async fn send(&self, message: &ChatMessage) -> Result<Delivery, DeliveryError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(self.timeout)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "chat message delivered");
            Ok(Delivery {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
