//! Routing decisions
//!
//! `classify` is the single entry point: one envelope in, one decision
//! out. Pure and total, so the same input always yields the same route.

use relay_core::Envelope;
use serde::{Deserialize, Serialize};

use crate::category::{Action, EventCategory};
use crate::priority::Priority;

/// Where an event goes after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Nothing to act on
    Ignore,
    /// Recorded in the log stream only
    Log,
    /// Delivered to the chat webhook
    Forward,
    /// Delivered to chat with escalation urgency
    Escalate,
}

impl Route {
    /// Check if this route calls for chat delivery
    pub fn delivers(&self) -> bool {
        matches!(self, Route::Forward | Route::Escalate)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Route::Ignore => write!(f, "IGNORE"),
            Route::Log => write!(f, "LOG"),
            Route::Forward => write!(f, "FORWARD"),
            Route::Escalate => write!(f, "ESCALATE"),
        }
    }
}

/// The outcome of classifying one envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub route: Route,
    pub category: EventCategory,
    pub priority: Priority,
    pub action: Action,
}

impl RoutingDecision {
    /// Check if the decision calls for chat delivery
    pub fn delivers(&self) -> bool {
        self.route.delivers()
    }
}

/// Classify an envelope into a routing decision.
///
/// Forwarding rule: deliver to chat when `detail.priority` is high,
/// critical, or urgent (critical and urgent escalate), or when the type
/// is one of the always-forwarded categories. A blank envelope is
/// ignored; everything else is logged.
pub fn classify(envelope: &Envelope) -> RoutingDecision {
    let priority = Priority::of(envelope);
    let category = EventCategory::parse(&envelope.detail_type);

    let route = if priority.is_escalation() {
        Route::Escalate
    } else if priority.triggers_forward() || category.always_forwarded() {
        Route::Forward
    } else if envelope.is_blank() {
        Route::Ignore
    } else {
        Route::Log
    };

    tracing::debug!(
        source = %envelope.source,
        detail_type = %envelope.detail_type,
        %route,
        "classified event"
    );

    RoutingDecision {
        route,
        category,
        priority,
        action: category.action(),
    }
}
