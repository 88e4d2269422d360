//! # grc-core — Foundational Types for the GRC Stack
//!
//! This crate is the bedrock of the GRC Stack. It defines the type-system
//! primitives shared by every other crate in the workspace; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `TenantId`, `UserId`,
//!    `DocumentId`, `AuditEntryId`, `ControlCode` — all newtypes. No bare
//!    strings or bare UUIDs for identifiers.
//!
//! 2. **Single `Role` enum.** One definition, exhaustive `match` everywhere.
//!    Adding a role forces every consumer to handle it at compile time.
//!
//! 3. **Single `ComplianceFramework` enum.** The assessment lifecycle, the
//!    tenant store, and the API all key framework data off this one type.
//!
//! 4. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision, so audit ordering and expiry comparisons are
//!    deterministic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `grc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod framework;
pub mod identity;
pub mod role;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use framework::{ComplianceFramework, FRAMEWORK_COUNT};
pub use identity::{AuditEntryId, ControlCode, DocumentId, TenantId, UserId};
pub use role::{Role, ROLE_COUNT};
pub use temporal::Timestamp;
