//! Assessment lifecycle scenarios over a real in-memory tenant store.

use std::sync::Arc;

use grc_assessment::{AssessmentError, AssessmentLifecycle, TemplateCatalog};
use grc_auth::Principal;
use grc_core::{ComplianceFramework, ControlCode, Role, TenantId, Timestamp, UserId};
use grc_store::{AssessmentItem, AssessmentState, ItemStatus, RunStatus, TenantStore};

const FW: ComplianceFramework = ComplianceFramework::Ecc;

fn principal(tenant: TenantId, role: Role) -> Principal {
    Principal {
        tenant_id: tenant,
        user_id: UserId::new(),
        name: "Analyst".to_string(),
        role,
        access_expires_at: None,
    }
}

fn fixture() -> (Arc<TenantStore>, AssessmentLifecycle, Principal) {
    let store = Arc::new(TenantStore::in_memory());
    let lifecycle =
        AssessmentLifecycle::new(store.clone(), TemplateCatalog::builtin().unwrap());
    let tenant = TenantId::new();
    (store, lifecycle, principal(tenant, Role::SecurityAnalyst))
}

fn state(store: &TenantStore, tenant: TenantId) -> AssessmentState {
    store
        .get(Some(&tenant))
        .assessment(FW)
        .cloned()
        .expect("framework state exists")
}

fn graded(code: &str) -> AssessmentItem {
    let mut item = AssessmentItem::pristine(ControlCode::from(code));
    item.status = ItemStatus::Implemented;
    item.status_description = "MFA enforced on all accounts".to_string();
    item
}

// ─── Initiation & Versioning ─────────────────────────────────────────

#[test]
fn test_first_initiate_resets_without_snapshot() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();

    let s = state(&store, analyst.tenant_id);
    assert_eq!(s.status, RunStatus::InProgress);
    assert!(!s.live.is_empty());
    assert!(s.live.iter().all(|i| !i.has_progress()));
    assert!(s.history.is_empty());
}

#[test]
fn test_reinitiate_without_progress_appends_nothing() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    lifecycle.initiate(&analyst, FW).unwrap();
    assert!(state(&store, analyst.tenant_id).history.is_empty());
}

#[test]
fn test_reinitiate_with_progress_archives_one_snapshot() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    lifecycle
        .update_item(&analyst, FW, &ControlCode::from("1-4-1"), graded("1-4-1"))
        .unwrap();
    let graded_live = state(&store, analyst.tenant_id).live;

    lifecycle.initiate(&analyst, FW).unwrap();

    let s = state(&store, analyst.tenant_id);
    assert_eq!(s.history.len(), 1);
    // The snapshot is the pre-reset live set, verbatim.
    assert_eq!(s.history[0].items, graded_live);
    // The fresh live set is pristine again.
    assert!(s.live.iter().all(|i| !i.has_progress()));
}

#[test]
fn test_history_only_grows_across_runs() {
    let (store, lifecycle, analyst) = fixture();
    let mut last = 0;
    for round in 0..3 {
        lifecycle.initiate(&analyst, FW).unwrap();
        lifecycle
            .update_item(&analyst, FW, &ControlCode::from("1-1-1"), graded("1-1-1"))
            .unwrap();
        let s = state(&store, analyst.tenant_id);
        assert_eq!(s.history.len(), round);
        assert!(s.history.len() >= last);
        last = s.history.len();
    }
}

// ─── Completion ──────────────────────────────────────────────────────

#[test]
fn test_complete_flips_status_and_keeps_live_set() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    lifecycle
        .update_item(&analyst, FW, &ControlCode::from("2-1-3"), graded("2-1-3"))
        .unwrap();

    lifecycle.complete(&analyst, FW).unwrap();

    let s = state(&store, analyst.tenant_id);
    assert_eq!(s.status, RunStatus::Idle);
    // The graded set stands as the current assessment.
    assert!(s.live.iter().any(|i| i.has_progress()));
    assert!(s.history.is_empty());
}

// ─── Item Updates ────────────────────────────────────────────────────

#[test]
fn test_update_replaces_whole_item_last_write_wins() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();

    let code = ControlCode::from("1-1-1");
    lifecycle.update_item(&analyst, FW, &code, graded("1-1-1")).unwrap();

    let mut second = AssessmentItem::pristine(code.clone());
    second.status = ItemStatus::PartiallyImplemented;
    second.recommendation = "Extend to service accounts".to_string();
    lifecycle.update_item(&analyst, FW, &code, second.clone()).unwrap();

    let s = state(&store, analyst.tenant_id);
    let item = s.live.iter().find(|i| i.control_code == code).unwrap();
    assert_eq!(*item, second);
}

#[test]
fn test_update_unknown_control_is_not_found() {
    let (_, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    let err = lifecycle
        .update_item(&analyst, FW, &ControlCode::from("9-9-9"), graded("9-9-9"))
        .unwrap_err();
    assert!(matches!(err, AssessmentError::ControlNotFound { .. }));
}

#[test]
fn test_update_code_mismatch_is_rejected() {
    let (_, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    let err = lifecycle
        .update_item(&analyst, FW, &ControlCode::from("1-1-1"), graded("1-4-1"))
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Validation(_)));
}

#[test]
fn test_oversized_evidence_is_rejected_before_the_store() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    let audit_before = store.get(Some(&analyst.tenant_id)).audit.len();

    let mut item = graded("1-1-1");
    item.evidence = Some("x".repeat(grc_store::EVIDENCE_REF_MAX_BYTES + 1));
    let err = lifecycle
        .update_item(&analyst, FW, &ControlCode::from("1-1-1"), item)
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Validation(_)));
    assert_eq!(store.get(Some(&analyst.tenant_id)).audit.len(), audit_before);
}

// ─── Permission Gates ────────────────────────────────────────────────

#[test]
fn test_employee_cannot_initiate_or_grade() {
    let (_, lifecycle, analyst) = fixture();
    let employee = principal(analyst.tenant_id, Role::Employee);

    let err = lifecycle.initiate(&employee, FW).unwrap_err();
    assert!(matches!(err, AssessmentError::MissingPermission(_)));

    lifecycle.initiate(&analyst, FW).unwrap();
    let err = lifecycle
        .update_item(&employee, FW, &ControlCode::from("1-1-1"), graded("1-1-1"))
        .unwrap_err();
    assert!(matches!(err, AssessmentError::MissingPermission(_)));
}

#[test]
fn test_expired_analyst_is_downgraded() {
    let (_, lifecycle, analyst) = fixture();
    let lapsed = Principal {
        access_expires_at: Some(Timestamp::from_epoch_secs(1).unwrap()),
        ..analyst
    };
    let err = lifecycle.initiate(&lapsed, FW).unwrap_err();
    assert!(matches!(err, AssessmentError::MissingPermission(_)));
}

// ─── Audit ───────────────────────────────────────────────────────────

#[test]
fn test_every_operation_appends_audit() {
    let (store, lifecycle, analyst) = fixture();
    lifecycle.initiate(&analyst, FW).unwrap();
    lifecycle
        .update_item(&analyst, FW, &ControlCode::from("1-1-1"), graded("1-1-1"))
        .unwrap();
    lifecycle.complete(&analyst, FW).unwrap();
    assert_eq!(store.get(Some(&analyst.tenant_id)).audit.len(), 3);
}
