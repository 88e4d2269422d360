//! # Audit Trail
//!
//! Append-only per-tenant ledger. Appends assign a synthetic id and a
//! write timestamp; reads return the full log in write order.

use serde::{Deserialize, Serialize};

use grc_core::{AuditEntryId, Timestamp, UserId};

/// Action tags for state-changing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A policy document was created from generated content.
    DocumentGenerated,
    /// A pending document stage was approved.
    DocumentApproved,
    /// A pending document was rejected.
    DocumentRejected,
    /// A framework's live assessment was reset to its template.
    AssessmentInitiated,
    /// A framework's assessment run was marked complete.
    AssessmentCompleted,
    /// A live assessment item was replaced.
    AssessmentItemUpdated,
    /// A user record was created.
    UserCreated,
    /// A user record was mutated (profile or security change).
    UserUpdated,
    /// A login attempt succeeded.
    LoginSucceeded,
    /// A login attempt failed.
    LoginFailed,
    /// A durable or remote write failed after an in-memory commit.
    PersistenceFailed,
}

impl AuditAction {
    /// The SCREAMING_SNAKE wire tag, matching the serde format.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::DocumentGenerated => "DOCUMENT_GENERATED",
            Self::DocumentApproved => "DOCUMENT_APPROVED",
            Self::DocumentRejected => "DOCUMENT_REJECTED",
            Self::AssessmentInitiated => "ASSESSMENT_INITIATED",
            Self::AssessmentCompleted => "ASSESSMENT_COMPLETED",
            Self::AssessmentItemUpdated => "ASSESSMENT_ITEM_UPDATED",
            Self::UserCreated => "USER_CREATED",
            Self::UserUpdated => "USER_UPDATED",
            Self::LoginSucceeded => "LOGIN_SUCCEEDED",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::PersistenceFailed => "PERSISTENCE_FAILED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Synthetic entry identifier, assigned at append.
    pub id: AuditEntryId,
    /// True write time.
    pub timestamp: Timestamp,
    /// The acting user.
    pub actor_id: UserId,
    /// Actor display name at the time of the action.
    pub actor_name: String,
    /// What happened.
    pub action: AuditAction,
    /// Free-text detail line.
    pub details: String,
    /// Optional target identifier (document id, control code, ...).
    pub target: Option<String>,
}

/// A tenant's append-only audit ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    entries: Vec<AuditLogEntry>,
}

impl AuditTrail {
    /// An empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, assigning its id and timestamp.
    ///
    /// Returns a reference to the appended entry.
    pub fn append(
        &mut self,
        actor_id: UserId,
        actor_name: impl Into<String>,
        action: AuditAction,
        details: impl Into<String>,
        target: Option<String>,
    ) -> &AuditLogEntry {
        self.entries.push(AuditLogEntry {
            id: AuditEntryId::new(),
            timestamp: Timestamp::now(),
            actor_id,
            actor_name: actor_name.into(),
            action,
            details: details.into(),
            target,
        });
        self.entries.last().expect("entry just appended")
    }

    /// The full log in write order.
    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> UserId {
        UserId::new()
    }

    #[test]
    fn test_append_assigns_id_and_timestamp() {
        let mut trail = AuditTrail::new();
        let entry = trail.append(
            actor(),
            "Nora",
            AuditAction::DocumentApproved,
            "approved stage CISO",
            Some("document:abc".to_string()),
        );
        assert_eq!(entry.action, AuditAction::DocumentApproved);
        assert_eq!(entry.actor_name, "Nora");
    }

    #[test]
    fn test_count_is_monotonic() {
        let mut trail = AuditTrail::new();
        let mut last = 0;
        for i in 0..10 {
            trail.append(actor(), "a", AuditAction::UserUpdated, format!("n{i}"), None);
            assert!(trail.len() > last);
            last = trail.len();
        }
        assert_eq!(trail.len(), 10);
    }

    #[test]
    fn test_entries_preserve_write_order() {
        let mut trail = AuditTrail::new();
        trail.append(actor(), "a", AuditAction::UserCreated, "first", None);
        trail.append(actor(), "a", AuditAction::UserUpdated, "second", None);
        let details: Vec<_> = trail.entries().iter().map(|e| e.details.as_str()).collect();
        assert_eq!(details, vec!["first", "second"]);
    }

    #[test]
    fn test_entry_ids_unique() {
        let mut trail = AuditTrail::new();
        for _ in 0..5 {
            trail.append(actor(), "a", AuditAction::LoginSucceeded, "", None);
        }
        let mut seen = std::collections::HashSet::new();
        for e in trail.entries() {
            assert!(seen.insert(e.id));
        }
    }

    #[test]
    fn test_action_tags() {
        assert_eq!(AuditAction::DocumentApproved.as_tag(), "DOCUMENT_APPROVED");
        assert_eq!(
            AuditAction::AssessmentInitiated.as_tag(),
            "ASSESSMENT_INITIATED"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut trail = AuditTrail::new();
        trail.append(actor(), "a", AuditAction::DocumentRejected, "rework", None);
        let json = serde_json::to_string(&trail).unwrap();
        let parsed: AuditTrail = serde_json::from_str(&json).unwrap();
        assert_eq!(trail, parsed);
    }
}
