//! # Application Error
//!
//! Maps domain errors to structured HTTP responses with proper status
//! codes and a JSON error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use grc_assessment::AssessmentError;
use grc_core::CoreError;
use grc_store::StoreError;
use grc_workflow::WorkflowError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication required.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions or wrong role for the pending stage.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The operation conflicts with the resource's current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::RoleMismatch { .. } | WorkflowError::MissingPermission(_) => {
                Self::Forbidden(e.to_string())
            }
            WorkflowError::DocumentFinal { .. } | WorkflowError::NotSubmitted => {
                Self::Conflict(e.to_string())
            }
            WorkflowError::NotFound(_) => Self::NotFound(e.to_string()),
            WorkflowError::Validation(_) => Self::Validation(e.to_string()),
            WorkflowError::NoTenantContext => Self::Unauthorized(e.to_string()),
        }
    }
}

impl From<AssessmentError> for AppError {
    fn from(e: AssessmentError) -> Self {
        match e {
            AssessmentError::MissingPermission(_) => Self::Forbidden(e.to_string()),
            AssessmentError::ControlNotFound { .. } => Self::NotFound(e.to_string()),
            AssessmentError::TemplateMissing(_) | AssessmentError::Validation(_) => {
                Self::Validation(e.to_string())
            }
            AssessmentError::Catalog(_) => Self::Internal(e.to_string()),
            AssessmentError::NoTenantContext => Self::Unauthorized(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::NotFound(msg) => Self::NotFound(msg),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_workflow_error_mapping() {
        use grc_core::Role;
        let err: AppError = WorkflowError::RoleMismatch {
            required: Role::Ciso,
            acting: Role::Cto,
        }
        .into();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err: AppError = WorkflowError::NotFound(grc_core::DocumentId::new()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
