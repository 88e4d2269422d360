//! # Role Taxonomy — Single Source of Truth
//!
//! Defines the `Role` enum with the seven organizational roles. This is
//! the ONE definition used across the entire stack. Every `match` on
//! `Role` must be exhaustive — adding a role forces every consumer to
//! handle it at compile time, including the permission table and the
//! approval chain.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// All organizational roles in the GRC Stack.
///
/// Each role carries a permission set resolved by `grc-auth`, and the
/// executive roles (`Ciso`, `Cto`, `Cio`, `Ceo`) double as approval
/// chain stages in `grc-workflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator (user and tenant management).
    Administrator,
    /// Chief Information Security Officer — first approval stage.
    Ciso,
    /// Chief Technology Officer — second approval stage.
    Cto,
    /// Chief Information Officer — third approval stage.
    Cio,
    /// Chief Executive Officer — final approval stage.
    Ceo,
    /// Security analyst (assessment grading, evidence handling).
    SecurityAnalyst,
    /// Baseline role; the fail-safe downgrade target for expired access.
    Employee,
}

/// Total number of roles. Used for compile-time assertions.
pub const ROLE_COUNT: usize = 7;

impl Role {
    /// Returns all roles in canonical order.
    pub fn all() -> &'static [Role] {
        &[
            Self::Administrator,
            Self::Ciso,
            Self::Cto,
            Self::Cio,
            Self::Ceo,
            Self::SecurityAnalyst,
            Self::Employee,
        ]
    }

    /// The lowest-privilege role, used as the default for unmapped
    /// external identities and for expired access.
    pub const LOWEST: Role = Role::Employee;

    /// Returns the SCREAMING_SNAKE string identifier for this role.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRATOR",
            Self::Ciso => "CISO",
            Self::Cto => "CTO",
            Self::Cio => "CIO",
            Self::Ceo => "CEO",
            Self::SecurityAnalyst => "SECURITY_ANALYST",
            Self::Employee => "EMPLOYEE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parse a role from its SCREAMING_SNAKE string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMINISTRATOR" => Ok(Self::Administrator),
            "CISO" => Ok(Self::Ciso),
            "CTO" => Ok(Self::Cto),
            "CIO" => Ok(Self::Cio),
            "CEO" => Ok(Self::Ceo),
            "SECURITY_ANALYST" => Ok(Self::SecurityAnalyst),
            "EMPLOYEE" => Ok(Self::Employee),
            other => Err(CoreError::Validation(format!("unknown role: {other:?}"))),
        }
    }
}
