//! # Permission Resolver
//!
//! The pure function mapping a role and its access-expiry state to an
//! effective permission set.
//!
//! ## Invariant
//!
//! Expired access resolves to exactly the Employee set regardless of the
//! nominal role — a fail-safe downgrade, not a fail-closed empty set.
//! The function never errors and has no side effects.

use grc_core::{Role, Timestamp};

use crate::permission::{PermissionSet, RolePermissionMap};

/// Resolve the effective permission set for a principal.
///
/// If `access_expires_at` is set and `now` is past it, the nominal role
/// is ignored and the Employee set is returned. Otherwise the role is
/// looked up in `map`; the map is total over `Role`, so every role
/// resolves to at least the base set.
pub fn resolve(
    map: &RolePermissionMap,
    role: Role,
    access_expires_at: Option<Timestamp>,
    now: Timestamp,
) -> PermissionSet {
    let effective = match access_expires_at {
        Some(expiry) if expiry.is_past(now) => Role::LOWEST,
        _ => role,
    };
    map.permissions_for(effective)
}
