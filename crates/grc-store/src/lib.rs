//! # grc-store — Tenant-Scoped State Store
//!
//! Holds all mutable business data, partitioned by tenant id. Every
//! other component mutates data only through [`TenantStore`].
//!
//! ## Layout
//!
//! - `tenant.rs` / `user.rs` — the tenant and user records.
//! - `document.rs` — policy documents, approval chain, approval steps
//!   (the *data*; the transition table lives in `grc-workflow`).
//! - `assessment.rs` — assessment items, snapshots, run status (the
//!   *data*; lifecycle operations live in `grc-assessment`).
//! - `company.rs` — the `CompanyData` bundle: one per tenant, the unit
//!   of persistence.
//! - `store.rs` — the arena-and-index shard store with per-tenant
//!   single-writer serialization.
//! - `persist.rs` — the `SnapshotStore` and `RemoteMirror` interfaces
//!   plus the filesystem snapshot implementation.
//! - `notify.rs` — the fire-and-forget notification sink interface.
//!
//! ## Tenancy Invariant
//!
//! Shards are addressed only by `TenantId` — never by shared reference —
//! so a mutation cannot alias another tenant's partition. One writer
//! logically owns a tenant's data at any instant; readers always see the
//! last committed value.
//!
//! ## Persistence Policy
//!
//! Durable and remote writes happen *after* the in-memory commit,
//! best-effort: failures are logged, surfaced as operator notifications,
//! and never roll back the committed state (at-most-once, no rollback).

pub mod assessment;
pub mod company;
pub mod document;
pub mod error;
pub mod notify;
pub mod persist;
pub mod store;
pub mod tenant;
pub mod user;

pub use assessment::{
    AssessmentItem, AssessmentRecord, AssessmentState, ItemStatus, RunStatus,
    EVIDENCE_REF_MAX_BYTES,
};
pub use company::CompanyData;
pub use document::{
    ApprovalChain, ApprovalStep, Decision, DocumentBody, DocumentStatus, PolicyDocument,
};
pub use error::StoreError;
pub use notify::{Notification, NotificationSink, NullSink, Recipient, RecordingSink};
pub use persist::{FileSnapshotStore, PersistError, RemoteMirror, SnapshotStore};
pub use store::TenantStore;
pub use tenant::{LicenseRecord, LicenseStatus, Tenant};
pub use user::User;
