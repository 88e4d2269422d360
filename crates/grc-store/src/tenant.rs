//! # Tenant Record
//!
//! Display metadata plus the license record. Tenants are created at
//! signup and never deleted in-band; a lapsed license transitions to
//! `Expired`, it does not remove the tenant.

use serde::{Deserialize, Serialize};

use grc_core::{TenantId, Timestamp};

/// The licensing state of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    /// License is paid up and in force.
    Active,
    /// License lapsed past its expiry.
    Expired,
    /// License was never activated or was manually disabled.
    Inactive,
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Inactive => "INACTIVE",
        })
    }
}

/// A tenant's license record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Stored status; see [`LicenseRecord::effective_status`].
    pub status: LicenseStatus,
    /// Commercial tier label (opaque to the core).
    pub tier: String,
    /// Expiry instant, if the license is time-limited.
    pub expires_at: Option<Timestamp>,
}

impl LicenseRecord {
    /// A fresh active license.
    pub fn active(tier: impl Into<String>, expires_at: Option<Timestamp>) -> Self {
        Self {
            status: LicenseStatus::Active,
            tier: tier.into(),
            expires_at,
        }
    }

    /// The status as of `now`: an active license past its expiry reads
    /// as `Expired` without any stored mutation.
    pub fn effective_status(&self, now: Timestamp) -> LicenseStatus {
        match (self.status, self.expires_at) {
            (LicenseStatus::Active, Some(expiry)) if expiry.is_past(now) => LicenseStatus::Expired,
            (status, _) => status,
        }
    }
}

/// An isolated customer organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// The license record.
    pub license: LicenseRecord,
}

impl Tenant {
    /// Create a tenant with an active license.
    pub fn new(name: impl Into<String>, license: LicenseRecord) -> Self {
        Self {
            id: TenantId::new(),
            name: name.into(),
            license,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(iso: &str) -> Timestamp {
        Timestamp::parse(iso).unwrap()
    }

    #[test]
    fn test_active_license_within_term() {
        let lic = LicenseRecord::active("enterprise", Some(at("2026-12-31T00:00:00Z")));
        assert_eq!(
            lic.effective_status(at("2026-06-01T00:00:00Z")),
            LicenseStatus::Active
        );
    }

    #[test]
    fn test_active_license_past_expiry_reads_expired() {
        let lic = LicenseRecord::active("enterprise", Some(at("2026-06-01T00:00:00Z")));
        assert_eq!(
            lic.effective_status(at("2026-06-02T00:00:00Z")),
            LicenseStatus::Expired
        );
        // The stored status is untouched.
        assert_eq!(lic.status, LicenseStatus::Active);
    }

    #[test]
    fn test_perpetual_license_never_expires() {
        let lic = LicenseRecord::active("founder", None);
        assert_eq!(
            lic.effective_status(at("2099-01-01T00:00:00Z")),
            LicenseStatus::Active
        );
    }

    #[test]
    fn test_inactive_stays_inactive() {
        let lic = LicenseRecord {
            status: LicenseStatus::Inactive,
            tier: "trial".to_string(),
            expires_at: Some(at("2026-01-01T00:00:00Z")),
        };
        assert_eq!(
            lic.effective_status(at("2026-06-01T00:00:00Z")),
            LicenseStatus::Inactive
        );
    }
}
