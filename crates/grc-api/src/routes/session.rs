//! # Session Routes
//!
//! - `POST /v1/session/login` — verify stored credentials and hand the
//!   client its identity plus the idle-countdown windows.
//!
//! Attempts against a known tenant are audited either way; the response
//! for every failure mode is the same 401 so the surface does not leak
//! which part of the credential was wrong.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use grc_audit::AuditAction;
use grc_auth::{verify_password, SessionWindows};
use grc_core::{Role, TenantId, UserId};
use grc_store::User;

use crate::error::AppError;
use crate::state::AppState;

/// Login request against a tenant's stored users.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The tenant partition to authenticate against.
    pub tenant_id: TenantId,
    /// Stored email (case-insensitive join key).
    pub email: String,
    /// Plaintext password, verified against the Argon2id hash.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    /// Idle windows the client drives its countdown with.
    pub session: SessionWindows,
}

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/session/login", post(login))
}

/// POST /v1/session/login — verify credentials against the stored hash.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Unknown tenants never reach the mutating path, so a bogus tenant
    // id cannot grow the arena or the snapshot directory.
    if state.store.get(Some(&req.tenant_id)).tenant.is_none() {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    // The failure audit entry is itself a committed mutation, so the
    // mutator distinguishes outcomes by value rather than by error.
    let resolved: Option<Option<User>> =
        state.store.update(Some(&req.tenant_id), |data| {
            let found = data.user_by_email(&req.email).cloned();
            let verified = found.as_ref().is_some_and(|user| {
                user.password_hash
                    .as_deref()
                    .is_some_and(|hash| verify_password(&req.password, hash).unwrap_or(false))
            });
            match found {
                Some(user) if verified => {
                    data.audit.append(
                        user.id,
                        &user.name,
                        AuditAction::LoginSucceeded,
                        format!("login for {}", user.email),
                        Some(user.id.to_string()),
                    );
                    Some(user)
                }
                found => {
                    let (actor_id, actor_name) = found
                        .map(|u| (u.id, u.name))
                        .unwrap_or_else(|| (UserId::new(), "unknown".to_string()));
                    data.audit.append(
                        actor_id,
                        actor_name,
                        AuditAction::LoginFailed,
                        format!("failed login for {}", req.email),
                        None,
                    );
                    None
                }
            }
        });

    match resolved.flatten() {
        Some(user) => {
            metrics::counter!("grc_logins_total").increment(1);
            Ok(Json(LoginResponse {
                user_id: user.id,
                name: user.name.clone(),
                role: user.role,
                session: state.config.session,
            }))
        }
        None => Err(AppError::Unauthorized("invalid credentials".to_string())),
    }
}
