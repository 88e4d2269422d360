//! # grc-api — Axum API Service
//!
//! The HTTP surface over the GRC Stack core.
//!
//! ## API Surface
//!
//! | Prefix                | Module                   | Domain                |
//! |-----------------------|--------------------------|-----------------------|
//! | `/v1/tenants/*`       | [`routes::tenants`]      | Tenant bootstrap      |
//! | `/v1/session/*`       | [`routes::session`]      | Credential login      |
//! | `/v1/documents/*`     | [`routes::documents`]    | Approval workflow     |
//! | `/v1/assessments/*`   | [`routes::assessments`]  | Assessment lifecycle  |
//! | `/v1/audit`           | [`routes::audit`]        | Audit ledger (read)   |
//! | `/health/*`           | —                        | Probes                |
//! | `/metrics`            | —                        | Prometheus render     |
//!
//! ## Principal Resolution
//!
//! `X-Grc-Tenant` and `X-Grc-User` headers are resolved against the
//! tenant's stored users (the stand-in for the external identity
//! provider). Role and access expiry always come from the stored
//! record.
//!
//! ## Crate Policy
//!
//! - No business logic in handlers — they delegate to `grc-workflow`,
//!   `grc-assessment`, and `grc-store` and translate errors via
//!   [`AppError`].

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router.
///
/// Health probes and the metrics render are mounted outside principal
/// resolution so they stay reachable without headers.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::tenants::router())
        .merge(routes::session::router())
        .merge(routes::documents::router())
        .merge(routes::assessments::router())
        .merge(routes::audit::router());

    Router::new()
        .route("/health/live", axum::routing::get(liveness))
        .route("/health/ready", axum::routing::get(readiness))
        .route("/metrics", axum::routing::get(render_metrics))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe — 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 once state is assembled.
async fn readiness() -> &'static str {
    "ready"
}

/// Prometheus text render; errors when no recorder is installed.
async fn render_metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::Internal("metrics recorder not installed".to_string()))
}
