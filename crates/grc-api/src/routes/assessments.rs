//! # Assessment Routes
//!
//! - `GET  /v1/assessments/{framework}` — live set, run status, history depth.
//! - `POST /v1/assessments/{framework}/initiate` — start or restart a run.
//! - `POST /v1/assessments/{framework}/complete` — mark the run done.
//! - `PUT  /v1/assessments/{framework}/items/{control_code}` — grade one item.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use grc_core::{ComplianceFramework, ControlCode};
use grc_store::{AssessmentItem, ItemStatus, RunStatus};

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

fn parse_framework(raw: &str) -> Result<ComplianceFramework, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("unknown compliance framework {raw:?}")))
}

/// One framework's assessment view.
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub framework: ComplianceFramework,
    pub status: RunStatus,
    pub live: Vec<AssessmentItem>,
    /// Number of archived runs; snapshot bodies are not shipped here.
    pub history_len: usize,
}

/// Item grading request; the whole item is replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub status: ItemStatus,
    #[serde(default)]
    pub status_description: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub management_response: String,
    #[serde(default)]
    pub target_date: String,
    #[serde(default)]
    pub evidence: Option<String>,
}

/// Build the assessments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/assessments/{framework}", get(get_assessment))
        .route("/v1/assessments/{framework}/initiate", post(initiate))
        .route("/v1/assessments/{framework}/complete", post(complete))
        .route(
            "/v1/assessments/{framework}/items/{control_code}",
            put(update_item),
        )
}

/// GET /v1/assessments/{framework} — the live set and run status.
async fn get_assessment(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(framework): Path<String>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let framework = parse_framework(&framework)?;
    current(state, principal.tenant_id, framework)
}

/// POST /v1/assessments/{framework}/initiate — start or restart a run.
async fn initiate(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(framework): Path<String>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let framework = parse_framework(&framework)?;
    state.assessments.initiate(&principal, framework)?;
    metrics::counter!("grc_assessments_initiated_total").increment(1);
    current(state, principal.tenant_id, framework)
}

/// POST /v1/assessments/{framework}/complete — mark the run done.
async fn complete(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(framework): Path<String>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let framework = parse_framework(&framework)?;
    state.assessments.complete(&principal, framework)?;
    metrics::counter!("grc_assessments_completed_total").increment(1);
    current(state, principal.tenant_id, framework)
}

/// PUT /v1/assessments/{framework}/items/{control_code} — grade one item.
async fn update_item(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path((framework, control_code)): Path<(String, String)>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let framework = parse_framework(&framework)?;
    let control = ControlCode::new(control_code);
    let item = AssessmentItem {
        control_code: control.clone(),
        status: req.status,
        status_description: req.status_description,
        recommendation: req.recommendation,
        management_response: req.management_response,
        target_date: req.target_date,
        evidence: req.evidence,
    };
    state
        .assessments
        .update_item(&principal, framework, &control, item)?;
    metrics::counter!("grc_assessment_items_updated_total").increment(1);
    current(state, principal.tenant_id, framework)
}

fn current(
    state: AppState,
    tenant: grc_core::TenantId,
    framework: ComplianceFramework,
) -> Result<Json<AssessmentResponse>, AppError> {
    let data = state.store.get(Some(&tenant));
    let assessment = data.assessment(framework);
    Ok(Json(AssessmentResponse {
        framework,
        status: assessment.map(|s| s.status).unwrap_or_default(),
        live: assessment.map(|s| s.live.clone()).unwrap_or_default(),
        history_len: assessment.map(|s| s.history.len()).unwrap_or(0),
    }))
}
