//! # Principal — Authenticated Caller Context
//!
//! The `Principal` is the context every mutating operation receives: a
//! tenant, a user, a nominal role, and the access-expiry state the
//! resolver folds into the effective permission set.
//!
//! Identity itself is external (spec'd as a pluggable provider); this
//! module maps a verified external identity onto a stored role
//! assignment, defaulting to the lowest-privilege role when the tenant
//! has no assignment for it.

use serde::{Deserialize, Serialize};

use grc_core::{Role, TenantId, Timestamp, UserId};

use crate::permission::{PermissionSet, RolePermissionMap};
use crate::resolver::resolve;

/// The authenticated user context supplied to permission checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The tenant partition every operation under this principal targets.
    pub tenant_id: TenantId,
    /// The acting user.
    pub user_id: UserId,
    /// Display name, carried into audit entries.
    pub name: String,
    /// Nominal role; the resolver may downgrade it.
    pub role: Role,
    /// Optional access expiry; past this instant the principal acts as
    /// Employee.
    pub access_expires_at: Option<Timestamp>,
}

impl Principal {
    /// The effective permission set for this principal at `now`.
    pub fn permissions(&self, map: &RolePermissionMap, now: Timestamp) -> PermissionSet {
        resolve(map, self.role, self.access_expires_at, now)
    }
}

/// A verified identity supplied by an external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Provider-scoped subject identifier.
    pub subject: String,
    /// Display name from the provider.
    pub display_name: String,
    /// Email address, the join key against stored users.
    pub email: String,
    /// Whether the provider verified this identity.
    pub verified: bool,
    /// Whether the provider enforced MFA for this session.
    pub mfa_enabled: bool,
}

/// A stored role assignment for an identity, looked up tenant-scoped by
/// the caller (the user record lives in the tenant store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssignment {
    /// The internal user the identity maps to.
    pub user_id: UserId,
    /// Stored display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Access expiry on the assignment, if any.
    pub access_expires_at: Option<Timestamp>,
}

/// Map an external identity onto a tenant principal.
///
/// An unverified identity, or one with no stored assignment in the
/// tenant, becomes a lowest-privilege principal under a freshly minted
/// user id. It can read what every Employee reads and nothing more.
pub fn map_external_identity(
    tenant_id: TenantId,
    identity: &ExternalIdentity,
    assignment: Option<StoredAssignment>,
) -> Principal {
    match assignment {
        Some(a) if identity.verified => Principal {
            tenant_id,
            user_id: a.user_id,
            name: a.name,
            role: a.role,
            access_expires_at: a.access_expires_at,
        },
        _ => Principal {
            tenant_id,
            user_id: UserId::new(),
            name: identity.display_name.clone(),
            role: Role::LOWEST,
            access_expires_at: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permission;

    fn identity(verified: bool) -> ExternalIdentity {
        ExternalIdentity {
            subject: "idp|12345".to_string(),
            display_name: "Nora".to_string(),
            email: "nora@example.com".to_string(),
            verified,
            mfa_enabled: true,
        }
    }

    #[test]
    fn test_mapped_identity_keeps_assignment() {
        let tenant = TenantId::new();
        let user = UserId::new();
        let p = map_external_identity(
            tenant,
            &identity(true),
            Some(StoredAssignment {
                user_id: user,
                name: "Nora A.".to_string(),
                role: Role::Ciso,
                access_expires_at: None,
            }),
        );
        assert_eq!(p.user_id, user);
        assert_eq!(p.role, Role::Ciso);
        assert_eq!(p.name, "Nora A.");
    }

    #[test]
    fn test_unmapped_identity_defaults_to_employee() {
        let p = map_external_identity(TenantId::new(), &identity(true), None);
        assert_eq!(p.role, Role::Employee);
    }

    #[test]
    fn test_unverified_identity_defaults_to_employee() {
        let p = map_external_identity(
            TenantId::new(),
            &identity(false),
            Some(StoredAssignment {
                user_id: UserId::new(),
                name: "Nora A.".to_string(),
                role: Role::Administrator,
                access_expires_at: None,
            }),
        );
        assert_eq!(p.role, Role::Employee);
    }

    #[test]
    fn test_principal_permissions_downgrade() {
        let map = RolePermissionMap::default();
        let now = Timestamp::parse("2026-03-01T10:10:00Z").unwrap();
        let p = Principal {
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
            name: "Admin".to_string(),
            role: Role::Administrator,
            access_expires_at: Some(Timestamp::parse("2026-03-01T10:00:00Z").unwrap()),
        };
        let perms = p.permissions(&map, now);
        assert!(!perms.contains(Permission::UsersManage));
    }
}
