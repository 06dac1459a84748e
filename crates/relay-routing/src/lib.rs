//! Relay Routing: event classification and routing decisions
//!
//! This crate decides what happens to each inbound event: whether it is
//! ignored, logged, forwarded to chat, or escalated, and which business
//! action it triggers.
//!
//! # Architecture
//!
//! ```text
//! Envelope → Priority ─┐
//!                      ├→ classify → RoutingDecision → ActionOutcome
//! Envelope → Category ─┘                   ↓
//!                                 Ignore/Log/Forward/Escalate
//! ```
//!
//! # Example
//!
//! ```
//! use relay_core::Envelope;
//! use relay_routing::{classify, Route};
//! use serde_json::json;
//!
//! let envelope = Envelope::new("custom.payments", "Payment Failed")
//!     .with_detail("amount", json!(120.0));
//!
//! let decision = classify(&envelope);
//! assert_eq!(decision.route, Route::Forward);
//! assert!(decision.delivers());
//! ```
//!
//! # Applying the business action
//!
//! ```
//! use relay_core::Envelope;
//! use relay_routing::{classify, ActionOutcome};
//! use serde_json::json;
//!
//! let envelope = Envelope::new("custom.shop", "Order Created")
//!     .with_detail("orderId", json!("o-42"));
//!
//! let decision = classify(&envelope);
//! let outcome = ActionOutcome::apply(decision.category, &envelope.detail);
//! assert_eq!(outcome.order_id.as_deref(), Some("o-42"));
//! ```

pub mod action;
pub mod category;
pub mod decision;
pub mod priority;

// Classification
pub use decision::{classify, Route, RoutingDecision};

// Tags
pub use category::{Action, EventCategory};
pub use priority::Priority;

// Business results
pub use action::ActionOutcome;

/// Quick check: does this envelope get delivered to chat?
pub fn should_forward(envelope: &relay_core::Envelope) -> bool {
    classify(envelope).delivers()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::Envelope;
    use serde_json::json;

    #[test]
    fn test_should_forward() {
        let urgent = Envelope::new("svc", "Status Update").with_detail("priority", json!("urgent"));
        assert!(should_forward(&urgent));

        let quiet = Envelope::new("svc", "Status Update");
        assert!(!should_forward(&quiet));
    }

    #[test]
    fn test_full_workflow() {
        let envelope = Envelope::new("custom.users", "User Registered")
            .with_detail("userId", json!("u-1"))
            .with_detail("email", json!("new@user.dev"));

        let decision = classify(&envelope);
        assert_eq!(decision.route, Route::Log);
        assert_eq!(decision.action, Action::SendWelcomeEmail);

        let outcome = ActionOutcome::apply(decision.category, &envelope.detail);
        assert_eq!(outcome.user_id.as_deref(), Some("u-1"));
        assert_eq!(outcome.email.as_deref(), Some("new@user.dev"));
    }
}
