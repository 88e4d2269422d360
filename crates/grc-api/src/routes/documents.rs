//! # Policy Document Routes
//!
//! - `GET  /v1/documents` — list the tenant's documents.
//! - `POST /v1/documents` — generate and submit a new document.
//! - `GET  /v1/documents/{document_id}` — one document with history.
//! - `POST /v1/documents/{document_id}/decision` — act on the pending stage.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use grc_core::{ControlCode, DocumentId, Role, Timestamp};
use grc_store::{ApprovalStep, Decision, PolicyDocument};

use crate::auth::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Create-document request.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// The control the document addresses.
    pub control_id: String,
    /// Display title.
    pub title: String,
}

/// Decision request on a pending stage.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// Approve or reject.
    pub decision: Decision,
    /// Optional reviewer comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// One document row in the list view.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub control_id: ControlCode,
    pub title: String,
    /// Wire-format status, e.g. `PENDING_CISO_APPROVAL`.
    pub status: String,
    /// The role whose decision is awaited, if pending.
    pub pending_role: Option<Role>,
    pub updated_at: Timestamp,
}

impl From<&PolicyDocument> for DocumentSummary {
    fn from(doc: &PolicyDocument) -> Self {
        Self {
            id: doc.id,
            control_id: doc.control_id.clone(),
            title: doc.title.clone(),
            status: doc.status.to_string(),
            pending_role: doc.status.required_role(),
            updated_at: doc.updated_at,
        }
    }
}

/// Full document response.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    pub body: grc_store::DocumentBody,
    pub approval_history: Vec<ApprovalStep>,
    pub created_at: Timestamp,
}

impl From<&PolicyDocument> for DocumentResponse {
    fn from(doc: &PolicyDocument) -> Self {
        Self {
            summary: DocumentSummary::from(doc),
            body: doc.body.clone(),
            approval_history: doc.approval_history.clone(),
            created_at: doc.created_at,
        }
    }
}

/// Decision response: the status after the transition.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub status: String,
    pub pending_role: Option<Role>,
}

/// Build the documents router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/documents", get(list_documents).post(create_document))
        .route("/v1/documents/{document_id}", get(get_document))
        .route("/v1/documents/{document_id}/decision", post(decide))
}

/// GET /v1/documents — list the tenant's documents, newest first.
async fn list_documents(
    State(state): State<AppState>,
    Caller(principal): Caller,
) -> Json<Vec<DocumentSummary>> {
    let data = state.store.get(Some(&principal.tenant_id));
    let mut rows: Vec<DocumentSummary> = data.documents.iter().map(Into::into).collect();
    rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Json(rows)
}

/// POST /v1/documents — generate content for a control and submit it.
async fn create_document(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    if req.control_id.trim().is_empty() || req.title.trim().is_empty() {
        return Err(AppError::Validation(
            "control_id and title must be non-empty".to_string(),
        ));
    }
    let document = state.workflow.generate_document(
        &principal,
        ControlCode::new(req.control_id),
        &req.title,
    )?;
    metrics::counter!("grc_documents_generated_total").increment(1);
    Ok(Json(DocumentResponse::from(&document)))
}

/// GET /v1/documents/{document_id} — one document with its history.
async fn get_document(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentResponse>, AppError> {
    let id = DocumentId::parse(&document_id)?;
    let data = state.store.get(Some(&principal.tenant_id));
    let doc = data
        .document(id)
        .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;
    Ok(Json(DocumentResponse::from(doc)))
}

/// POST /v1/documents/{document_id}/decision — act on the pending stage.
async fn decide(
    State(state): State<AppState>,
    Caller(principal): Caller,
    Path(document_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, AppError> {
    let id = DocumentId::parse(&document_id)?;
    let next = state
        .workflow
        .decide(&principal, id, req.decision, req.comment)?;
    metrics::counter!("grc_document_decisions_total").increment(1);
    Ok(Json(DecisionResponse {
        status: next.to_string(),
        pending_role: next.required_role(),
    }))
}
