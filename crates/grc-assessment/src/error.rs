//! Assessment lifecycle error types.

use thiserror::Error;

use grc_auth::Permission;
use grc_core::{ComplianceFramework, ControlCode};
use grc_store::StoreError;

/// Errors raised by assessment lifecycle operations.
#[derive(Error, Debug)]
pub enum AssessmentError {
    /// The principal's effective permission set lacks the required grant.
    #[error("authorization mismatch: missing permission {0}")]
    MissingPermission(Permission),

    /// The control code does not exist in the framework's live set.
    #[error("control {control} not found in the live {framework} set")]
    ControlNotFound {
        /// The framework whose live set was searched.
        framework: ComplianceFramework,
        /// The missing control code.
        control: ControlCode,
    },

    /// The template catalog has no item set for a framework.
    #[error("no template set for framework {0}")]
    TemplateMissing(ComplianceFramework),

    /// The built-in catalog failed to parse.
    #[error("template catalog error: {0}")]
    Catalog(String),

    /// Item content failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation ran without a tenant context.
    #[error("no tenant context for assessment operation")]
    NoTenantContext,
}

impl From<StoreError> for AssessmentError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::NotFound(msg) => Self::Validation(msg),
        }
    }
}
