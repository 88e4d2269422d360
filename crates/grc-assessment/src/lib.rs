//! # grc-assessment — Versioned Assessment Lifecycle
//!
//! Operations over a tenant's per-framework assessment state:
//!
//! - `template.rs` — the pristine item-set catalog (embedded YAML
//!   defaults plus an override API).
//! - `lifecycle.rs` — initiate / complete / item-update, the permission
//!   gates, and the versioning rule.
//!
//! ## Versioning Rule
//!
//! Re-initiating a framework whose live set carries any grading progress
//! appends exactly one deep snapshot to the history before the reset.
//! Initiating over a zero-progress live set appends nothing. History
//! entries, once written, are never mutated or removed by any operation.

pub mod error;
pub mod lifecycle;
pub mod template;

pub use error::AssessmentError;
pub use lifecycle::AssessmentLifecycle;
pub use template::TemplateCatalog;
