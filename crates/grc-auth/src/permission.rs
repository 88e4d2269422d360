//! # Permission Model
//!
//! The exhaustive `Permission` enum, the `PermissionSet` wrapper, and
//! the `RolePermissionMap` that materializes the role→permission table.
//!
//! ## Design
//!
//! The table is composed, not enumerated per role: every role starts
//! from the Employee base set and adds override grants. A new capability
//! is therefore added in exactly one place and inherited explicitly by
//! the roles that name it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use grc_core::{CoreError, Role};

/// An opaque capability tag gating one category of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read policy documents.
    DocumentsView,
    /// Create documents from generated content.
    DocumentsGenerate,
    /// Act on a document's pending approval stage.
    DocumentsApprove,
    /// Read assessment items and history.
    AssessmentsView,
    /// Grade assessment items.
    AssessmentsEdit,
    /// Reset a framework's live assessment set.
    AssessmentsInitiate,
    /// Read the audit ledger.
    AuditView,
    /// Manage tenant users.
    UsersManage,
    /// Manage tenant settings and licensing.
    TenantManage,
    /// Access training modules.
    TrainingView,
    /// View dashboards and reports.
    ReportsView,
    /// Use AI-assisted content generation.
    AiAssist,
}

/// Total number of permissions. Used for compile-time assertions.
pub const PERMISSION_COUNT: usize = 12;

impl Permission {
    /// Returns all permissions in canonical order.
    pub fn all() -> &'static [Permission] {
        &[
            Self::DocumentsView,
            Self::DocumentsGenerate,
            Self::DocumentsApprove,
            Self::AssessmentsView,
            Self::AssessmentsEdit,
            Self::AssessmentsInitiate,
            Self::AuditView,
            Self::UsersManage,
            Self::TenantManage,
            Self::TrainingView,
            Self::ReportsView,
            Self::AiAssist,
        ]
    }

    /// Returns the colon-delimited wire tag for this permission
    /// (e.g. `documents:approve`).
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::DocumentsView => "documents:view",
            Self::DocumentsGenerate => "documents:generate",
            Self::DocumentsApprove => "documents:approve",
            Self::AssessmentsView => "assessments:view",
            Self::AssessmentsEdit => "assessments:edit",
            Self::AssessmentsInitiate => "assessments:initiate",
            Self::AuditView => "audit:view",
            Self::UsersManage => "users:manage",
            Self::TenantManage => "tenant:manage",
            Self::TrainingView => "training:view",
            Self::ReportsView => "reports:view",
            Self::AiAssist => "ai:assist",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    /// Parse a permission from its colon-delimited wire tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::all()
            .iter()
            .find(|p| p.as_tag() == s)
            .copied()
            .ok_or_else(|| CoreError::Validation(format!("unknown permission: {s:?}")))
    }
}

/// An unordered set of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from a slice of permissions.
    pub fn from_slice(perms: &[Permission]) -> Self {
        Self(perms.iter().copied().collect())
    }

    /// Whether the set grants the given permission.
    pub fn contains(&self, perm: Permission) -> bool {
        self.0.contains(&perm)
    }

    /// The union of this set and another.
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    /// Add a single grant.
    pub fn grant(&mut self, perm: Permission) {
        self.0.insert(perm);
    }

    /// Number of grants in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the grants in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The role→permission table, composed from a base set plus per-role
/// additive overrides.
#[derive(Debug, Clone)]
pub struct RolePermissionMap {
    base: PermissionSet,
    overrides: Vec<(Role, PermissionSet)>,
}

impl RolePermissionMap {
    /// Build a map from an explicit base set and per-role overrides.
    ///
    /// Roles without an override entry resolve to the base set alone.
    pub fn new(base: PermissionSet, overrides: Vec<(Role, PermissionSet)>) -> Self {
        Self { base, overrides }
    }

    /// The effective permission set for a role: base ∪ override.
    pub fn permissions_for(&self, role: Role) -> PermissionSet {
        let extra = self
            .overrides
            .iter()
            .filter(|(r, _)| *r == role)
            .fold(PermissionSet::empty(), |acc, (_, set)| acc.union(set));
        self.base.union(&extra)
    }

    /// The base grant set shared by every role.
    pub fn base(&self) -> &PermissionSet {
        &self.base
    }
}

impl Default for RolePermissionMap {
    /// The product permission table.
    ///
    /// Employee is the base: training, reports, and read access to
    /// documents and assessments. Each heavier role adds grants on top.
    fn default() -> Self {
        use Permission::*;

        let base = PermissionSet::from_slice(&[
            DocumentsView,
            AssessmentsView,
            TrainingView,
            ReportsView,
        ]);

        let analyst = PermissionSet::from_slice(&[AssessmentsEdit, AssessmentsInitiate, AuditView]);
        let approver = PermissionSet::from_slice(&[DocumentsApprove, DocumentsGenerate, AiAssist]);
        let admin = PermissionSet::from_slice(&[
            DocumentsGenerate,
            AssessmentsEdit,
            AssessmentsInitiate,
            AuditView,
            UsersManage,
            TenantManage,
            AiAssist,
        ]);

        let mut executive = approver.clone();
        executive.grant(AuditView);

        Self::new(
            base,
            vec![
                (Role::Administrator, admin),
                (Role::SecurityAnalyst, analyst),
                (Role::Ciso, executive.union(&PermissionSet::from_slice(&[
                    AssessmentsEdit,
                    AssessmentsInitiate,
                ]))),
                (Role::Cto, executive.clone()),
                (Role::Cio, executive.clone()),
                (Role::Ceo, executive),
            ],
        )
    }
}
