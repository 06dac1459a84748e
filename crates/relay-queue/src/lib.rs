//! Relay Queue: batch consumption with partial-failure isolation
//!
//! Consumes batches of queued records and reports per-record outcomes,
//! so the queue platform redelivers only what actually failed.
//!
//! ```text
//! [records] → decode → classify → apply action ─┬→ notify (best-effort)
//!     │                                         │
//!     └──────── per-record isolation ───────────┴→ BatchReport
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use relay_queue::{BatchDispatcher, QueueRecord};
//!
//! let dispatcher = BatchDispatcher::new(notifier);
//! let report = dispatcher
//!     .dispatch(&[QueueRecord::new("m-1", r#"{"detail": {"priority": "high"}}"#)])
//!     .await;
//! assert!(report.fully_successful());
//! ```

pub mod dispatcher;
pub mod record;
pub mod report;

pub use dispatcher::BatchDispatcher;
pub use record::{QueueBatch, QueueRecord};
pub use report::{BatchReport, FailureRecord, ItemFailure, SuccessRecord};
