//! # Tenant Routes
//!
//! - `POST /v1/tenants` — bootstrap a tenant with its first administrator.
//! - `GET  /v1/tenants/{tenant_id}` — tenant record and effective license.
//!
//! Creation is the unauthenticated bootstrap path: until a tenant has a
//! stored user there is nothing to resolve a principal against.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use grc_audit::AuditAction;
use grc_core::{Role, TenantId, Timestamp, UserId};
use grc_store::{CompanyData, LicenseRecord, LicenseStatus, Tenant, User};

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Tenant bootstrap request.
#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    /// Tenant display name.
    pub name: String,
    /// License tier label.
    pub tier: String,
    /// Optional license expiry.
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// First administrator's display name.
    pub admin_name: String,
    /// First administrator's email.
    pub admin_email: String,
}

/// Tenant bootstrap response.
#[derive(Debug, Serialize)]
pub struct CreateTenantResponse {
    pub tenant_id: TenantId,
    pub admin_user_id: UserId,
}

/// Tenant view with the effective license status.
#[derive(Debug, Serialize)]
pub struct TenantResponse {
    pub tenant_id: TenantId,
    pub name: String,
    pub tier: String,
    /// Status as read now: an active license past its expiry reads
    /// expired.
    pub license_status: LicenseStatus,
    pub user_count: usize,
}

/// Build the tenants router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/tenants", post(create_tenant))
        .route("/v1/tenants/{tenant_id}", get(get_tenant))
}

/// POST /v1/tenants — create a tenant and its first administrator.
async fn create_tenant(
    State(state): State<AppState>,
    Json(req): Json<CreateTenantRequest>,
) -> Result<Json<CreateTenantResponse>, AppError> {
    if req.name.trim().is_empty() || req.admin_name.trim().is_empty() {
        return Err(AppError::Validation(
            "tenant and administrator names must be non-empty".to_string(),
        ));
    }
    if !req.admin_email.contains('@') {
        return Err(AppError::Validation(format!(
            "malformed administrator email {:?}",
            req.admin_email
        )));
    }

    let tenant = Tenant::new(req.name, LicenseRecord::active(req.tier, req.expires_at));
    let tenant_id = tenant.id;
    let admin = User::new(req.admin_name, req.admin_email, Role::Administrator);
    let admin_user_id = admin.id;

    state
        .store
        .update(Some(&tenant_id), move |data| {
            *data = CompanyData::for_tenant(tenant);
            data.audit.append(
                admin.id,
                &admin.name,
                AuditAction::UserCreated,
                format!("bootstrapped tenant with administrator {}", admin.email),
                Some(admin.id.to_string()),
            );
            data.users.push(admin);
        })
        .ok_or_else(|| AppError::Internal("tenant context vanished during bootstrap".to_string()))?;

    metrics::counter!("grc_tenants_created_total").increment(1);
    tracing::info!(%tenant_id, "tenant bootstrapped");
    Ok(Json(CreateTenantResponse {
        tenant_id,
        admin_user_id,
    }))
}

/// GET /v1/tenants/{tenant_id} — tenant record and effective license.
///
/// Callers can only read their own tenant.
async fn get_tenant(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(tenant_id): Path<String>,
) -> Result<Json<TenantResponse>, AppError> {
    let tenant_id = TenantId::parse(&tenant_id)?;
    if tenant_id != principal.tenant_id {
        return Err(AppError::Forbidden(
            "callers can only read their own tenant".to_string(),
        ));
    }
    let data = state.store.get(Some(&tenant_id));
    let tenant = data
        .tenant
        .as_ref()
        .ok_or_else(|| AppError::NotFound(format!("tenant {tenant_id}")))?;
    Ok(Json(TenantResponse {
        tenant_id: tenant.id,
        name: tenant.name.clone(),
        tier: tenant.license.tier.clone(),
        license_status: tenant.license.effective_status(Timestamp::now()),
        user_count: data.users.len(),
    }))
}
