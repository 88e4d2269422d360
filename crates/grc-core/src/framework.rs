//! # Compliance Framework Taxonomy — Single Source of Truth
//!
//! Defines the `ComplianceFramework` enum with the six framework slots a
//! tenant grades itself against. One definition, exhaustive `match`
//! everywhere — the assessment lifecycle, the tenant store, and the API
//! all key framework data off this type, so a framework cannot exist in
//! one component's map and be missing from another's.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// All compliance frameworks with a live assessment set per tenant.
///
/// Each framework owns one live item set, one append-only snapshot
/// history, and one run-status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceFramework {
    /// NCA Essential Cybersecurity Controls.
    Ecc,
    /// Personal Data Protection Law.
    Pdpl,
    /// SAMA Cybersecurity Framework.
    Sama,
    /// Capital Market Authority regulations.
    Cma,
    /// HRSD labor-sector requirements.
    Hrsd,
    /// The generic organizational risk register.
    RiskRegister,
}

/// Total number of frameworks. Used for compile-time assertions.
pub const FRAMEWORK_COUNT: usize = 6;

impl ComplianceFramework {
    /// Returns all frameworks in canonical order.
    pub fn all() -> &'static [ComplianceFramework] {
        &[
            Self::Ecc,
            Self::Pdpl,
            Self::Sama,
            Self::Cma,
            Self::Hrsd,
            Self::RiskRegister,
        ]
    }

    /// Returns the snake_case string identifier for this framework.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecc => "ecc",
            Self::Pdpl => "pdpl",
            Self::Sama => "sama",
            Self::Cma => "cma",
            Self::Hrsd => "hrsd",
            Self::RiskRegister => "risk_register",
        }
    }
}

impl std::fmt::Display for ComplianceFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceFramework {
    type Err = CoreError;

    /// Parse a framework from its snake_case string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecc" => Ok(Self::Ecc),
            "pdpl" => Ok(Self::Pdpl),
            "sama" => Ok(Self::Sama),
            "cma" => Ok(Self::Cma),
            "hrsd" => Ok(Self::Hrsd),
            "risk_register" => Ok(Self::RiskRegister),
            other => Err(CoreError::Validation(format!(
                "unknown compliance framework: {other:?}"
            ))),
        }
    }
}
