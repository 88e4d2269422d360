//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the GRC Stack. These prevent
//! accidental identifier confusion — you cannot pass a `UserId` where a
//! `TenantId` is expected.
//!
//! ## Tenancy Invariant
//!
//! Every tenant-owned record is addressed by `TenantId` plus its own id.
//! Type-level distinction between identifier namespaces keeps a lookup in
//! one tenant's partition from ever resolving against another's.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tenant (customer organization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub Uuid);

/// Unique identifier for a user within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Unique identifier for a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

/// Unique identifier for an audit ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditEntryId(pub Uuid);

/// A compliance control code, unique within one framework's live set
/// (e.g. `"2-1-3"` in ECC, `"A.5"` in a risk register).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlCode(pub String);

macro_rules! uuid_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse from a bare UUID string.
            pub fn parse(s: &str) -> Result<Self, crate::CoreError> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| crate::CoreError::Validation(format!("invalid {}: {e}", $prefix)))
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

uuid_id!(TenantId, "tenant");
uuid_id!(UserId, "user");
uuid_id!(DocumentId, "document");
uuid_id!(AuditEntryId, "audit");

impl ControlCode {
    /// Wrap a control code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ControlCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ControlCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
