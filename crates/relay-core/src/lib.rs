//! Relay Core: envelope and notification data model
//!
//! Shared foundation for the routing, formatting, and dispatch crates:
//! the inbound event envelope, the normalized notification derived from
//! queue records, runtime configuration, and the common error types.

pub mod config;
pub mod envelope;
pub mod error;
pub mod notification;

pub use config::RelayConfig;
pub use envelope::Envelope;
pub use error::{ConfigError, ExtractError};
pub use notification::Notification;

/// Version of the relay pipeline
pub const RELAY_VERSION: &str = "1.0.0";
