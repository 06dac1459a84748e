//! Event categories: the closed set of known event types
//!
//! Free-form type strings are mapped onto an enumerated tag once, at
//! classification time. Everything downstream dispatches on the tag,
//! never on the raw string.

use serde::{Deserialize, Serialize};

/// Business category inferred from an envelope's type string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    UserRegistered,
    OrderCreated,
    PaymentFailed,
    Error,
    Failure,
    SecurityAlert,
    /// Catch-all for types outside the known set
    #[default]
    Unclassified,
}

impl EventCategory {
    /// Map a free-form type string onto the closed set.
    ///
    /// Matching is exact on the canonical spellings; anything else is
    /// Unclassified. Priority matching, by contrast, is case-insensitive.
    pub fn parse(detail_type: &str) -> Self {
        match detail_type {
            "User Registered" => EventCategory::UserRegistered,
            "Order Created" => EventCategory::OrderCreated,
            "Payment Failed" => EventCategory::PaymentFailed,
            "Error" => EventCategory::Error,
            "Failure" => EventCategory::Failure,
            "Security Alert" => EventCategory::SecurityAlert,
            _ => EventCategory::Unclassified,
        }
    }

    /// Business action tag for this category
    pub fn action(&self) -> Action {
        match self {
            EventCategory::UserRegistered => Action::SendWelcomeEmail,
            EventCategory::OrderCreated => Action::ProcessOrder,
            EventCategory::PaymentFailed => Action::NotifySupport,
            _ => Action::LogEvent,
        }
    }

    /// Check if this category forwards to chat regardless of priority
    pub fn always_forwarded(&self) -> bool {
        matches!(
            self,
            EventCategory::Error
                | EventCategory::Failure
                | EventCategory::PaymentFailed
                | EventCategory::SecurityAlert
        )
    }

    /// The canonical wire spelling of this category
    pub fn canonical_name(&self) -> &'static str {
        match self {
            EventCategory::UserRegistered => "User Registered",
            EventCategory::OrderCreated => "Order Created",
            EventCategory::PaymentFailed => "Payment Failed",
            EventCategory::Error => "Error",
            EventCategory::Failure => "Failure",
            EventCategory::SecurityAlert => "Security Alert",
            EventCategory::Unclassified => "Unclassified",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Business-level action inferred from the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SendWelcomeEmail,
    ProcessOrder,
    NotifySupport,
    LogEvent,
}

impl Action {
    /// The wire tag for this action
    pub fn tag(&self) -> &'static str {
        match self {
            Action::SendWelcomeEmail => "send_welcome_email",
            Action::ProcessOrder => "process_order",
            Action::NotifySupport => "notify_support",
            Action::LogEvent => "log_event",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
