//! # Principal Resolution
//!
//! Stands in for the external identity provider: the caller presents
//! `X-Grc-Tenant` and `X-Grc-User` headers and is resolved against the
//! tenant's stored users. An unknown tenant, unknown user, or
//! deactivated user is a 401 — role and expiry come from the stored
//! record, never from the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use grc_auth::Principal;
use grc_core::{TenantId, UserId};

use crate::error::AppError;
use crate::state::AppState;

/// Header naming the tenant partition the request targets.
pub const TENANT_HEADER: &str = "x-grc-tenant";
/// Header naming the acting user within that tenant.
pub const USER_HEADER: &str = "x-grc-user";

/// The resolved caller, extracted by handlers that mutate or read
/// tenant data.
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

fn header_id<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let tenant_id = TenantId::parse(header_id(parts, TENANT_HEADER)?)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        let user_id = UserId::parse(header_id(parts, USER_HEADER)?)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let data = state.store.get(Some(&tenant_id));
        if data.tenant.is_none() {
            return Err(AppError::Unauthorized(format!("unknown tenant {tenant_id}")));
        }
        let user = data
            .users
            .iter()
            .find(|u| u.id == user_id && u.active)
            .ok_or_else(|| {
                tracing::warn!(%tenant_id, %user_id, "principal resolution failed");
                AppError::Unauthorized(format!("unknown user {user_id}"))
            })?;

        Ok(Caller(Principal {
            tenant_id,
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
            access_expires_at: user.access_expires_at,
        }))
    }
}
