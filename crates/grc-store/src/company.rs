//! # CompanyData — The Per-Tenant Bundle
//!
//! Everything one tenant owns, in one serializable value: the tenant
//! record, users, policy documents, per-framework assessment state, the
//! approval chain configuration, and the audit trail. This is the unit
//! of persistence — one snapshot per tenant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use grc_audit::AuditTrail;
use grc_core::{ComplianceFramework, DocumentId, Role};

use crate::assessment::AssessmentState;
use crate::document::{ApprovalChain, PolicyDocument};
use crate::tenant::Tenant;
use crate::user::User;

/// One tenant's complete mutable business data.
///
/// The default value is the empty bundle returned for absent tenants:
/// no tenant record, no users, no documents, empty assessment states,
/// the default approval chain, and an empty audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    /// The tenant record; `None` for the empty default bundle.
    pub tenant: Option<Tenant>,
    /// Tenant members.
    pub users: Vec<User>,
    /// Policy documents, never deleted.
    pub documents: Vec<PolicyDocument>,
    /// Per-framework assessment state.
    pub assessments: BTreeMap<ComplianceFramework, AssessmentState>,
    /// The tenant's approval chain configuration.
    pub approval_chain: ApprovalChain,
    /// The append-only audit ledger.
    pub audit: AuditTrail,
}

impl Default for CompanyData {
    fn default() -> Self {
        Self {
            tenant: None,
            users: Vec::new(),
            documents: Vec::new(),
            assessments: BTreeMap::new(),
            approval_chain: ApprovalChain::default(),
            audit: AuditTrail::new(),
        }
    }
}

impl CompanyData {
    /// A fresh bundle for a newly created tenant.
    pub fn for_tenant(tenant: Tenant) -> Self {
        Self {
            tenant: Some(tenant),
            ..Self::default()
        }
    }

    /// Find a document by id.
    pub fn document(&self, id: DocumentId) -> Option<&PolicyDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Find a document by id, mutably.
    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut PolicyDocument> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    /// All active users holding the given role.
    pub fn users_with_role(&self, role: Role) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.active && u.role == role)
            .collect()
    }

    /// Look up an active user by email (external-identity join key).
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.active && u.email.eq_ignore_ascii_case(email))
    }

    /// One framework's assessment state, creating the empty state on
    /// first touch.
    pub fn assessment_mut(&mut self, framework: ComplianceFramework) -> &mut AssessmentState {
        self.assessments.entry(framework).or_default()
    }

    /// One framework's assessment state, if it was ever touched.
    pub fn assessment(&self, framework: ComplianceFramework) -> Option<&AssessmentState> {
        self.assessments.get(&framework)
    }
}
