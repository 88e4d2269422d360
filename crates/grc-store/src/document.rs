//! # Policy Document Data
//!
//! The document record, its status states, the per-tenant approval
//! chain, and the append-only approval history. The transition table
//! that moves a document between these states lives in `grc-workflow`;
//! this module only defines the shapes and their invariants.
//!
//! ## States
//!
//! ```text
//! (created, already submitted)
//!        │
//!        ▼
//! PendingApproval(chain[0]) ──▶ PendingApproval(chain[1]) ──▶ ... ──▶ Approved (terminal)
//!        │                             │
//!        └──────────▶ Rejected ◀───────┘        (terminal, from any pending stage)
//! ```
//!
//! `Draft` is declared but no core operation produces or consumes it —
//! documents enter the chain already submitted for first-level sign-off.

use serde::{Deserialize, Serialize};

use grc_core::{ControlCode, DocumentId, Role, Timestamp};

use crate::error::StoreError;

// ─── Approval Chain ──────────────────────────────────────────────────

/// The ordered list of approver roles a document passes through.
///
/// Stored per tenant; the default is the fixed CISO → CTO → CIO → CEO
/// order. Construction rejects empty chains and duplicate roles, so the
/// pairing of pending state to required role is always well-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct ApprovalChain {
    roles: Vec<Role>,
}

impl ApprovalChain {
    /// Build a chain from an ordered role list.
    ///
    /// # Errors
    ///
    /// Rejects an empty list or a list with duplicate roles.
    pub fn new(roles: Vec<Role>) -> Result<Self, StoreError> {
        if roles.is_empty() {
            return Err(StoreError::Validation(
                "approval chain must not be empty".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for role in &roles {
            if !seen.insert(role) {
                return Err(StoreError::Validation(format!(
                    "approval chain contains duplicate role {role}"
                )));
            }
        }
        Ok(Self { roles })
    }

    /// The first approver role — where new documents land.
    pub fn first(&self) -> Role {
        self.roles[0]
    }

    /// The role after `role` in the chain, or `None` when `role` is the
    /// last stage (its approval is final).
    pub fn next_after(&self, role: Role) -> Option<Role> {
        let idx = self.roles.iter().position(|r| *r == role)?;
        self.roles.get(idx + 1).copied()
    }

    /// Whether the role is a stage of this chain.
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The ordered roles.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

impl Default for ApprovalChain {
    fn default() -> Self {
        Self {
            roles: vec![Role::Ciso, Role::Cto, Role::Cio, Role::Ceo],
        }
    }
}

impl TryFrom<Vec<Role>> for ApprovalChain {
    type Error = StoreError;

    fn try_from(roles: Vec<Role>) -> Result<Self, Self::Error> {
        Self::new(roles)
    }
}

impl From<ApprovalChain> for Vec<Role> {
    fn from(chain: ApprovalChain) -> Self {
        chain.roles
    }
}

// ─── Document Status ─────────────────────────────────────────────────

/// The lifecycle state of a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Declared but never produced by any core operation.
    Draft,
    /// Awaiting a decision from the named role.
    PendingApproval(Role),
    /// Passed every chain stage (terminal).
    Approved,
    /// Rejected at some pending stage (terminal).
    Rejected,
}

impl DocumentStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// The role required to act on this state, if it is pending.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::PendingApproval(role) => Some(*role),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => f.write_str("DRAFT"),
            Self::PendingApproval(role) => write!(f, "PENDING_{}_APPROVAL", role.as_str()),
            Self::Approved => f.write_str("APPROVED"),
            Self::Rejected => f.write_str("REJECTED"),
        }
    }
}

// ─── Decisions & History ─────────────────────────────────────────────

/// A decision on a pending approval stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Advance to the next stage (or finalize at the last stage).
    Approved,
    /// Terminate the document as rejected.
    Rejected,
}

/// One immutable step of a document's approval history, ordered by
/// write order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// The role that decided.
    pub role: Role,
    /// The decision taken.
    pub decision: Decision,
    /// When the step was recorded.
    pub timestamp: Timestamp,
    /// Optional reviewer comment.
    pub comment: Option<String>,
}

// ─── Document Body ───────────────────────────────────────────────────

/// The three-part generated body of a policy document. Content is
/// opaque to the core; only presence is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBody {
    /// Why the policy exists.
    pub purpose: String,
    /// The policy statement.
    pub policy: String,
    /// Implementation procedures.
    pub procedures: String,
}

impl DocumentBody {
    /// Validate that all three sections are present and non-blank.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (name, section) in [
            ("purpose", &self.purpose),
            ("policy", &self.policy),
            ("procedures", &self.procedures),
        ] {
            if section.trim().is_empty() {
                return Err(StoreError::Validation(format!(
                    "generated document is missing the {name} section"
                )));
            }
        }
        Ok(())
    }
}

// ─── Policy Document ─────────────────────────────────────────────────

/// A policy document owned by one tenant.
///
/// Created from generated content, already submitted for first-level
/// sign-off; mutated only via workflow transitions; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The control this document addresses.
    pub control_id: ControlCode,
    /// Display title.
    pub title: String,
    /// Current lifecycle state.
    pub status: DocumentStatus,
    /// The three-part body.
    pub body: DocumentBody,
    /// Append-only decision history.
    pub approval_history: Vec<ApprovalStep>,
    /// Creation instant.
    pub created_at: Timestamp,
    /// Last transition instant.
    pub updated_at: Timestamp,
}

impl PolicyDocument {
    /// Create a document already submitted to the chain's first stage.
    ///
    /// # Errors
    ///
    /// Fails when the body is missing a required section.
    pub fn submitted(
        control_id: ControlCode,
        title: impl Into<String>,
        body: DocumentBody,
        chain: &ApprovalChain,
    ) -> Result<Self, StoreError> {
        body.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: DocumentId::new(),
            control_id,
            title: title.into(),
            status: DocumentStatus::PendingApproval(chain.first()),
            body,
            approval_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}
