//! # grc-workflow — Document Approval Workflow
//!
//! The state machine governing a policy document's approval lifecycle.
//!
//! - `machine.rs` — the explicit transition table: a pure function from
//!   (status, acting role, decision, chain) to the next status. Every
//!   rejection reason is a typed error; nothing is silently ignored.
//! - `service.rs` — the orchestration layer: permission gate, tenant
//!   store update, audit append, approver notification fan-out.
//! - `content.rs` — the external content-generation interface and the
//!   creation path that validates the three-part body.
//!
//! ## Guarantees
//!
//! - A decision by any role other than the one the pending stage names
//!   changes nothing: not the status, not the history, not the audit
//!   count. The caller gets `WorkflowError::RoleMismatch`.
//! - Terminal documents accept no further decisions.
//! - Every successful decision appends exactly one history step and
//!   exactly one audit entry.
//! - The state change commits even when the next stage has zero
//!   eligible approvers; the starvation case produces an operator
//!   notice instead of blocking.

pub mod content;
pub mod error;
pub mod machine;
pub mod service;

pub use content::{ContentGenerator, ScaffoldGenerator, StaticGenerator};
pub use error::WorkflowError;
pub use machine::transition;
pub use service::ApprovalWorkflow;
