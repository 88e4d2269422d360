//! # Workflow Error Types
//!
//! Every refused transition is a typed, reportable error. The source
//! system resolved authorization mismatches as silent no-ops; here they
//! are explicit so callers always have a deterministic failure branch.

use thiserror::Error;

use grc_auth::Permission;
use grc_core::{DocumentId, Role};
use grc_store::{DocumentStatus, StoreError};

/// Errors raised by approval workflow operations.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The acting role does not match the role the pending stage names.
    #[error("authorization mismatch: {acting} cannot act on a stage pending {required}")]
    RoleMismatch {
        /// The role the current pending stage requires.
        required: Role,
        /// The role that attempted the decision.
        acting: Role,
    },

    /// The principal's effective permission set lacks the required grant.
    #[error("authorization mismatch: missing permission {0}")]
    MissingPermission(Permission),

    /// The document is in a terminal state and accepts no decision.
    #[error("document is final in state {status}")]
    DocumentFinal {
        /// The terminal status.
        status: DocumentStatus,
    },

    /// The document was never submitted to the chain (Draft).
    #[error("document is a draft and has not been submitted for approval")]
    NotSubmitted,

    /// The referenced document does not exist in the tenant's partition.
    #[error("document {0} not found")]
    NotFound(DocumentId),

    /// Generated content or chain configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation ran without a tenant context.
    #[error("no tenant context for workflow operation")]
    NoTenantContext,
}

impl From<StoreError> for WorkflowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::NotFound(msg) => Self::Validation(msg),
        }
    }
}
