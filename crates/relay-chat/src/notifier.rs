//! Best-effort notification dispatch
//!
//! Processing layers never talk to the webhook directly; they hand
//! envelopes to a `Notifier`. The webhook implementation formats and
//! delivers; tests substitute a recording fake.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Envelope, RelayConfig};

use crate::message::ChatMessage;
use crate::sender::{ChatSender, Delivery, DeliveryError};

/// A channel that can deliver event notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Check if this notifier can deliver at all
    fn enabled(&self) -> bool;

    /// Deliver a notification for one envelope
    async fn notify(&self, envelope: &Envelope) -> Result<Delivery, DeliveryError>;
}

/// Webhook-backed notifier: formats the envelope and posts it.
pub struct WebhookNotifier {
    sender: Option<ChatSender>,
    bot_name: String,
}

impl WebhookNotifier {
    /// Build from configuration.
    ///
    /// Without a webhook URL the notifier is disabled: deliveries are
    /// skipped with a log line, never errors.
    pub fn new(config: &RelayConfig) -> Self {
        let sender = match ChatSender::new(config) {
            Ok(sender) => Some(sender),
            Err(_) => {
                tracing::info!("webhook not configured, chat delivery disabled");
                None
            }
        };
        Self {
            sender,
            bot_name: config.bot_name.clone(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn enabled(&self) -> bool {
        self.sender.is_some()
    }

    async fn notify(&self, envelope: &Envelope) -> Result<Delivery, DeliveryError> {
        let sender = self.sender.as_ref().ok_or(DeliveryError::NotConfigured)?;
        let message = ChatMessage::build(envelope, &self.bot_name);
        sender.send(&message).await
    }
}

/// Deliver in the background, logging the outcome.
///
/// Never blocks and never reports failure to the caller: chat delivery
/// is best-effort by contract.
pub fn dispatch(notifier: &Arc<dyn Notifier>, envelope: &Envelope) {
    if !notifier.enabled() {
        tracing::debug!("notifier disabled, skipping delivery");
        return;
    }

    let notifier = Arc::clone(notifier);
    let envelope = envelope.clone();
    tokio::spawn(async move {
        match notifier.notify(&envelope).await {
            Ok(delivery) => {
                tracing::debug!(status = delivery.status, "notification delivered");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to deliver notification");
            }
        }
    });
}
