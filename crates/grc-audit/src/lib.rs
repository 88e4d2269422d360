//! # grc-audit — Append-Only Audit Ledger
//!
//! The forensic record of the GRC Stack. One `AuditTrail` lives inside
//! each tenant's data bundle; every state-changing core operation
//! appends exactly one entry through it.
//!
//! ## Invariants
//!
//! - Entries are immutable once appended; there is no edit or delete
//!   surface anywhere in the crate.
//! - Entry count is strictly monotonic across any sequence of core
//!   operations.
//! - Entries are ordered by true write order; callers apply their own
//!   display ordering.

pub mod ledger;

pub use ledger::{AuditAction, AuditLogEntry, AuditTrail};
