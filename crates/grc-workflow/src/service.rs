//! # Approval Workflow Service
//!
//! The orchestration layer over the transition table: gate by the
//! principal's effective permissions, run the mutation inside the tenant
//! shard, append the audit entry in the same commit, and fan out
//! approver notifications only after the commit stands.
//!
//! Notification collection happens inside the mutator (it needs the
//! committed chain and user list), but delivery happens outside the
//! shard lock so a slow sink never holds up other writers.

use std::sync::Arc;

use grc_audit::AuditAction;
use grc_auth::{Permission, Principal, RolePermissionMap};
use grc_core::{ControlCode, DocumentId, Timestamp};
use grc_store::{
    ApprovalStep, Decision, DocumentStatus, Notification, NotificationSink, NullSink,
    PolicyDocument, TenantStore,
};

use crate::content::ContentGenerator;
use crate::error::WorkflowError;
use crate::machine::transition;

/// Role-gated document approval workflow over a tenant store.
pub struct ApprovalWorkflow {
    store: Arc<TenantStore>,
    permissions: RolePermissionMap,
    generator: Arc<dyn ContentGenerator>,
    notifier: Arc<dyn NotificationSink>,
}

impl ApprovalWorkflow {
    /// A workflow over `store` using the default permission map and a
    /// discarding notifier.
    pub fn new(store: Arc<TenantStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            permissions: RolePermissionMap::default(),
            generator,
            notifier: Arc::new(NullSink),
        }
    }

    /// Replace the permission map.
    pub fn with_permissions(mut self, permissions: RolePermissionMap) -> Self {
        self.permissions = permissions;
        self
    }

    /// Attach a notification sink for approver and starvation notices.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Generate a policy document for a control and submit it to the
    /// tenant's approval chain.
    ///
    /// The document lands on the chain's first stage; every active user
    /// holding that role is notified after the commit.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::MissingPermission`] — principal lacks the
    ///   document-generation grant.
    /// - [`WorkflowError::Validation`] — the generated body is missing a
    ///   required section.
    pub fn generate_document(
        &self,
        principal: &Principal,
        control_id: ControlCode,
        title: &str,
    ) -> Result<PolicyDocument, WorkflowError> {
        self.require(principal, Permission::DocumentsGenerate)?;
        let body = self.generator.generate(&control_id, title)?;

        let actor_id = principal.user_id;
        let actor_name = principal.name.clone();
        let title = title.to_string();
        let result = self
            .store
            .update_result(Some(&principal.tenant_id), move |data| {
                let document =
                    PolicyDocument::submitted(control_id, title, body, &data.approval_chain)?;
                let first_stage = data.approval_chain.first();
                data.audit.append(
                    actor_id,
                    &actor_name,
                    AuditAction::DocumentGenerated,
                    format!(
                        "generated document '{}' for control {}, pending {first_stage} approval",
                        document.title, document.control_id
                    ),
                    Some(document.id.to_string()),
                );
                let notices = stage_notices(data, &document, first_stage);
                data.documents.push(document.clone());
                Ok::<_, WorkflowError>((document, notices))
            })
            .ok_or(WorkflowError::NoTenantContext)?;

        let (document, notices) = result?;
        self.deliver(notices);
        tracing::info!(document = %document.id, control = %document.control_id, "document submitted for approval");
        Ok(document)
    }

    /// Apply an approval decision to a pending document.
    ///
    /// On success exactly one history step and one audit entry are
    /// appended. When the decision advances the document to a stage with
    /// no eligible approver, the transition still commits and the
    /// operator channel receives a starvation notice.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::MissingPermission`] — principal lacks the
    ///   approval grant.
    /// - [`WorkflowError::NotFound`] — no such document in the tenant.
    /// - Any refusal of [`transition`], leaving the document untouched.
    pub fn decide(
        &self,
        principal: &Principal,
        document_id: DocumentId,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<DocumentStatus, WorkflowError> {
        self.require(principal, Permission::DocumentsApprove)?;

        let acting_role = principal.role;
        let actor_id = principal.user_id;
        let actor_name = principal.name.clone();
        let result = self
            .store
            .update_result(Some(&principal.tenant_id), move |data| {
                let chain = data.approval_chain.clone();
                let current = data
                    .document(document_id)
                    .ok_or(WorkflowError::NotFound(document_id))?
                    .status;
                let next = transition(current, acting_role, decision, &chain)?;

                // Validated; everything below must succeed.
                let document = data
                    .document_mut(document_id)
                    .ok_or(WorkflowError::NotFound(document_id))?;
                let now = Timestamp::now();
                document.approval_history.push(ApprovalStep {
                    role: acting_role,
                    decision,
                    timestamp: now,
                    comment,
                });
                document.status = next;
                document.updated_at = now;
                let document = document.clone();

                let (action, detail) = match decision {
                    Decision::Approved => (
                        AuditAction::DocumentApproved,
                        format!("approved '{}' as {acting_role}, now {next}", document.title),
                    ),
                    Decision::Rejected => (
                        AuditAction::DocumentRejected,
                        format!("rejected '{}' as {acting_role}", document.title),
                    ),
                };
                data.audit
                    .append(actor_id, &actor_name, action, detail, Some(document_id.to_string()));

                let notices = match next {
                    DocumentStatus::PendingApproval(stage) => stage_notices(data, &document, stage),
                    _ => Vec::new(),
                };
                Ok::<_, WorkflowError>((next, notices))
            })
            .ok_or(WorkflowError::NoTenantContext)?;

        let (next, notices) = result?;
        self.deliver(notices);
        tracing::info!(document = %document_id, status = %next, "approval decision committed");
        Ok(next)
    }

    /// The permission map this workflow resolves against. Shared with
    /// routes that gate reads on the same table.
    pub fn permission_map(&self) -> &RolePermissionMap {
        &self.permissions
    }

    fn require(&self, principal: &Principal, permission: Permission) -> Result<(), WorkflowError> {
        let granted = principal.permissions(&self.permissions, Timestamp::now());
        if granted.contains(permission) {
            Ok(())
        } else {
            Err(WorkflowError::MissingPermission(permission))
        }
    }

    fn deliver(&self, notices: Vec<Notification>) {
        for notice in notices {
            self.notifier.notify(notice);
        }
    }
}

/// Notices for a document arriving at a pending stage: one per active
/// holder of the stage role, or a single operator starvation notice when
/// the tenant has none.
fn stage_notices(
    data: &grc_store::CompanyData,
    document: &PolicyDocument,
    stage: grc_core::Role,
) -> Vec<Notification> {
    let approvers = data.users_with_role(stage);
    if approvers.is_empty() {
        return vec![Notification::operator(format!(
            "document '{}' ({}) awaits {stage} approval but the tenant has no active {stage}",
            document.title, document.id
        ))];
    }
    approvers
        .into_iter()
        .map(|user| {
            Notification::user(
                user.id,
                format!("document '{}' awaits your {stage} approval", document.title),
            )
        })
        .collect()
}
