//! # Assessment Lifecycle Service
//!
//! Initiate, complete, and item-update operations over a framework's
//! live set. Re-initiation is the only operation that versions: when the
//! live set carries any grading progress, a deep snapshot is appended to
//! the history before the reset. History entries are never mutated or
//! removed afterwards.

use std::sync::Arc;

use grc_audit::AuditAction;
use grc_auth::{Permission, Principal, RolePermissionMap};
use grc_core::{ComplianceFramework, ControlCode, Timestamp};
use grc_store::{
    AssessmentItem, AssessmentRecord, Notification, NotificationSink, NullSink, RunStatus,
    TenantStore, EVIDENCE_REF_MAX_BYTES,
};

use crate::error::AssessmentError;
use crate::template::TemplateCatalog;

/// Versioned assessment lifecycle over a tenant store.
pub struct AssessmentLifecycle {
    store: Arc<TenantStore>,
    permissions: RolePermissionMap,
    templates: TemplateCatalog,
    notifier: Arc<dyn NotificationSink>,
}

impl AssessmentLifecycle {
    /// A lifecycle over `store` with the given catalog, the default
    /// permission map, and a discarding notifier.
    pub fn new(store: Arc<TenantStore>, templates: TemplateCatalog) -> Self {
        Self {
            store,
            permissions: RolePermissionMap::default(),
            templates,
            notifier: Arc::new(NullSink),
        }
    }

    /// Replace the permission map.
    pub fn with_permissions(mut self, permissions: RolePermissionMap) -> Self {
        self.permissions = permissions;
        self
    }

    /// Attach a notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Start (or restart) a framework's assessment run.
    ///
    /// If the live set carries any grading progress, one deep snapshot
    /// of it is appended to the history first. The live set is then
    /// replaced with a pristine template copy and the run is marked in
    /// progress. A run already underway restarts the same way — the
    /// progress-bearing live set is versioned, never lost.
    ///
    /// # Errors
    ///
    /// - [`AssessmentError::MissingPermission`] — principal lacks the
    ///   initiation grant.
    /// - [`AssessmentError::TemplateMissing`] — no catalog set for the
    ///   framework.
    pub fn initiate(
        &self,
        principal: &Principal,
        framework: ComplianceFramework,
    ) -> Result<(), AssessmentError> {
        self.require(principal, Permission::AssessmentsInitiate)?;
        let template = self.templates.pristine_set(framework)?;

        let actor_id = principal.user_id;
        let actor_name = principal.name.clone();
        let snapshotted = self
            .store
            .update(Some(&principal.tenant_id), move |data| {
                let state = data.assessment_mut(framework);
                let snapshotted = state.live.iter().any(AssessmentItem::has_progress);
                if snapshotted {
                    state.history.push(AssessmentRecord {
                        recorded_at: Timestamp::now(),
                        items: state.live.clone(),
                    });
                }
                state.live = template;
                state.status = RunStatus::InProgress;
                data.audit.append(
                    actor_id,
                    &actor_name,
                    AuditAction::AssessmentInitiated,
                    format!(
                        "initiated {framework} assessment{}",
                        if snapshotted { ", previous run archived" } else { "" }
                    ),
                    Some(framework.to_string()),
                );
                snapshotted
            })
            .ok_or(AssessmentError::NoTenantContext)?;

        self.notifier.notify(Notification::user(
            principal.user_id,
            format!("{framework} assessment run started"),
        ));
        tracing::info!(%framework, archived = snapshotted, "assessment run initiated");
        Ok(())
    }

    /// Mark a framework's run complete. Flips the run status to idle and
    /// touches nothing else — the graded live set stays as the current
    /// standing assessment.
    pub fn complete(
        &self,
        principal: &Principal,
        framework: ComplianceFramework,
    ) -> Result<(), AssessmentError> {
        self.require(principal, Permission::AssessmentsInitiate)?;

        let actor_id = principal.user_id;
        let actor_name = principal.name.clone();
        self.store
            .update(Some(&principal.tenant_id), move |data| {
                let state = data.assessment_mut(framework);
                state.status = RunStatus::Idle;
                data.audit.append(
                    actor_id,
                    &actor_name,
                    AuditAction::AssessmentCompleted,
                    format!("completed {framework} assessment run"),
                    Some(framework.to_string()),
                );
            })
            .ok_or(AssessmentError::NoTenantContext)?;
        tracing::info!(%framework, "assessment run completed");
        Ok(())
    }

    /// Replace one graded item in a framework's live set.
    ///
    /// Last write wins on the whole item. The control code of the
    /// replacement must match the addressed code.
    ///
    /// # Errors
    ///
    /// - [`AssessmentError::MissingPermission`] — principal lacks the
    ///   grading grant.
    /// - [`AssessmentError::ControlNotFound`] — the code is not in the
    ///   live set.
    /// - [`AssessmentError::Validation`] — code mismatch or oversized
    ///   evidence reference.
    pub fn update_item(
        &self,
        principal: &Principal,
        framework: ComplianceFramework,
        control_code: &ControlCode,
        new_item: AssessmentItem,
    ) -> Result<(), AssessmentError> {
        self.require(principal, Permission::AssessmentsEdit)?;
        if new_item.control_code != *control_code {
            return Err(AssessmentError::Validation(format!(
                "item carries control {} but addresses {control_code}",
                new_item.control_code
            )));
        }
        if let Some(evidence) = &new_item.evidence {
            if evidence.len() > EVIDENCE_REF_MAX_BYTES {
                return Err(AssessmentError::Validation(format!(
                    "evidence reference exceeds {EVIDENCE_REF_MAX_BYTES} bytes"
                )));
            }
        }

        let actor_id = principal.user_id;
        let actor_name = principal.name.clone();
        let control = control_code.clone();
        self.store
            .update_result(Some(&principal.tenant_id), move |data| {
                let state = data.assessment_mut(framework);
                let slot = state
                    .live
                    .iter_mut()
                    .find(|item| item.control_code == control)
                    .ok_or(AssessmentError::ControlNotFound {
                        framework,
                        control: control.clone(),
                    })?;
                let status = new_item.status;
                *slot = new_item;
                data.audit.append(
                    actor_id,
                    &actor_name,
                    AuditAction::AssessmentItemUpdated,
                    format!("graded {framework} control {control} as {status}"),
                    Some(control.to_string()),
                );
                Ok::<_, AssessmentError>(())
            })
            .ok_or(AssessmentError::NoTenantContext)??;
        Ok(())
    }

    fn require(
        &self,
        principal: &Principal,
        permission: Permission,
    ) -> Result<(), AssessmentError> {
        let granted = principal.permissions(&self.permissions, Timestamp::now());
        if granted.contains(permission) {
            Ok(())
        } else {
            Err(AssessmentError::MissingPermission(permission))
        }
    }
}
