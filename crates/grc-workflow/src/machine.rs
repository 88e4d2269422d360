//! # Approval Transition Table
//!
//! The pure function that moves a document status under a decision.
//! The (state, event) → next-state pairing is data: the chain supplies
//! the stage order, and each pending state names the exact role that
//! may act on it.
//!
//! ```text
//! PendingApproval(r), acting == r, Approved, r not last  ──▶ PendingApproval(next(r))
//! PendingApproval(r), acting == r, Approved, r last      ──▶ Approved
//! PendingApproval(r), acting == r, Rejected              ──▶ Rejected
//! PendingApproval(r), acting != r                        ──▶ RoleMismatch (no change)
//! Approved | Rejected                                    ──▶ DocumentFinal (no change)
//! Draft                                                  ──▶ NotSubmitted (no change)
//! ```

use grc_core::Role;
use grc_store::{ApprovalChain, Decision, DocumentStatus};

use crate::error::WorkflowError;

/// Compute the next status for a decision, without mutating anything.
///
/// # Errors
///
/// - [`WorkflowError::DocumentFinal`] — terminal status.
/// - [`WorkflowError::NotSubmitted`] — draft status.
/// - [`WorkflowError::RoleMismatch`] — acting role is not the stage's.
/// - [`WorkflowError::Validation`] — the pending role is not a stage of
///   the supplied chain (a misconfigured tenant chain).
pub fn transition(
    status: DocumentStatus,
    acting_role: Role,
    decision: Decision,
    chain: &ApprovalChain,
) -> Result<DocumentStatus, WorkflowError> {
    let required = match status {
        DocumentStatus::Approved | DocumentStatus::Rejected => {
            return Err(WorkflowError::DocumentFinal { status });
        }
        DocumentStatus::Draft => return Err(WorkflowError::NotSubmitted),
        DocumentStatus::PendingApproval(role) => role,
    };

    if acting_role != required {
        return Err(WorkflowError::RoleMismatch {
            required,
            acting: acting_role,
        });
    }
    if !chain.contains(required) {
        return Err(WorkflowError::Validation(format!(
            "pending role {required} is not a stage of the tenant's approval chain"
        )));
    }

    Ok(match decision {
        Decision::Rejected => DocumentStatus::Rejected,
        Decision::Approved => match chain.next_after(required) {
            Some(next) => DocumentStatus::PendingApproval(next),
            None => DocumentStatus::Approved,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ApprovalChain {
        ApprovalChain::default()
    }

    #[test]
    fn test_approve_advances_through_chain() {
        let c = chain();
        let s = transition(
            DocumentStatus::PendingApproval(Role::Ciso),
            Role::Ciso,
            Decision::Approved,
            &c,
        )
        .unwrap();
        assert_eq!(s, DocumentStatus::PendingApproval(Role::Cto));

        let s = transition(s, Role::Cto, Decision::Approved, &c).unwrap();
        assert_eq!(s, DocumentStatus::PendingApproval(Role::Cio));

        let s = transition(s, Role::Cio, Decision::Approved, &c).unwrap();
        assert_eq!(s, DocumentStatus::PendingApproval(Role::Ceo));

        let s = transition(s, Role::Ceo, Decision::Approved, &c).unwrap();
        assert_eq!(s, DocumentStatus::Approved);
    }

    #[test]
    fn test_reject_is_terminal_at_any_stage() {
        let c = chain();
        for role in [Role::Ciso, Role::Cto, Role::Cio, Role::Ceo] {
            let s = transition(
                DocumentStatus::PendingApproval(role),
                role,
                Decision::Rejected,
                &c,
            )
            .unwrap();
            assert_eq!(s, DocumentStatus::Rejected);
        }
    }

    #[test]
    fn test_wrong_role_is_mismatch_for_every_other_role() {
        let c = chain();
        for pending in [Role::Ciso, Role::Cto, Role::Cio, Role::Ceo] {
            for acting in Role::all() {
                if *acting == pending {
                    continue;
                }
                let err = transition(
                    DocumentStatus::PendingApproval(pending),
                    *acting,
                    Decision::Approved,
                    &c,
                )
                .unwrap_err();
                match err {
                    WorkflowError::RoleMismatch { required, acting: a } => {
                        assert_eq!(required, pending);
                        assert_eq!(a, *acting);
                    }
                    other => panic!("expected RoleMismatch, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        let c = chain();
        for status in [DocumentStatus::Approved, DocumentStatus::Rejected] {
            for role in Role::all() {
                for decision in [Decision::Approved, Decision::Rejected] {
                    let err = transition(status, *role, decision, &c).unwrap_err();
                    assert!(matches!(err, WorkflowError::DocumentFinal { .. }));
                }
            }
        }
    }

    #[test]
    fn test_draft_is_not_submittable_here() {
        let err = transition(
            DocumentStatus::Draft,
            Role::Ciso,
            Decision::Approved,
            &chain(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::NotSubmitted));
    }

    #[test]
    fn test_shorter_chain_finalizes_early() {
        let c = ApprovalChain::new(vec![Role::Ciso, Role::Ceo]).unwrap();
        let s = transition(
            DocumentStatus::PendingApproval(Role::Ciso),
            Role::Ciso,
            Decision::Approved,
            &c,
        )
        .unwrap();
        assert_eq!(s, DocumentStatus::PendingApproval(Role::Ceo));
        let s = transition(s, Role::Ceo, Decision::Approved, &c).unwrap();
        assert_eq!(s, DocumentStatus::Approved);
    }

    #[test]
    fn test_pending_role_outside_chain_is_invalid() {
        let c = ApprovalChain::new(vec![Role::Ciso, Role::Ceo]).unwrap();
        let err = transition(
            DocumentStatus::PendingApproval(Role::Cto),
            Role::Cto,
            Decision::Approved,
            &c,
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }
}
