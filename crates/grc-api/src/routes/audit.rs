//! # Audit Ledger Routes
//!
//! - `GET /v1/audit` — the tenant's full audit trail in write order.
//!
//! Read-only by construction: there is no delete or edit surface.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use grc_audit::AuditLogEntry;
use grc_auth::Permission;
use grc_core::Timestamp;

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Audit listing response.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub count: usize,
    pub entries: Vec<AuditLogEntry>,
}

/// Build the audit router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/audit", get(list_audit))
}

/// GET /v1/audit — the tenant's audit trail, oldest first.
async fn list_audit(
    State(state): State<AppState>,
    Caller(principal): Caller,
) -> Result<Json<AuditResponse>, AppError> {
    let granted = principal.permissions(state.workflow.permission_map(), Timestamp::now());
    if !granted.contains(Permission::AuditView) {
        return Err(AppError::Forbidden(format!(
            "missing permission {}",
            Permission::AuditView
        )));
    }
    let data = state.store.get(Some(&principal.tenant_id));
    let entries = data.audit.entries().to_vec();
    Ok(Json(AuditResponse {
        count: entries.len(),
        entries,
    }))
}
