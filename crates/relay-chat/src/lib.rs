//! Relay Chat: message formatting and webhook delivery
//!
//! This crate turns envelopes into rich chat messages and posts them to
//! the configured webhook, one POST per message, no retries.
//!
//! # Example
//!
//! ```ignore
//! use relay_chat::{ChatMessage, ChatSender};
//! use relay_core::{Envelope, RelayConfig};
//! use serde_json::json;
//!
//! let config = RelayConfig::new().with_webhook_url("https://hooks.example.com/T/B/x");
//! let sender = ChatSender::new(&config)?;
//!
//! let envelope = Envelope::new("custom.auth", "Security Alert")
//!     .with_detail("message", json!("unusual login"));
//!
//! let delivery = sender.send(&ChatMessage::build(&envelope, &config.bot_name)).await?;
//! println!("delivered with status {}", delivery.status);
//! ```

pub mod message;
pub mod notifier;
pub mod sender;

pub use message::{Attachment, ChatMessage, Color, Field};
pub use notifier::{dispatch, Notifier, WebhookNotifier};
pub use sender::{ChatSender, Delivery, DeliveryError};
