//! # Assessment Data
//!
//! One framework's graded item set: the live working copy, the
//! append-only snapshot history, and the run-status flag. Lifecycle
//! operations (initiate/complete/update) live in `grc-assessment`.

use serde::{Deserialize, Serialize};

use grc_core::{ControlCode, Timestamp};

use crate::error::StoreError;

/// Ceiling on the byte length of an evidence reference.
pub const EVIDENCE_REF_MAX_BYTES: usize = 4096;

/// Grading status of one assessment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Control is fully in place.
    Implemented,
    /// Control is partially in place.
    PartiallyImplemented,
    /// Ungraded default.
    #[default]
    NotImplemented,
    /// Control does not apply to this tenant.
    NotApplicable,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Implemented => "IMPLEMENTED",
            Self::PartiallyImplemented => "PARTIALLY_IMPLEMENTED",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::NotApplicable => "NOT_APPLICABLE",
        })
    }
}

/// One graded control in a framework's live set. Unique per control
/// code within the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentItem {
    /// The control this item grades.
    pub control_code: ControlCode,
    /// Grading status.
    pub status: ItemStatus,
    /// Free-text description of the current state.
    pub status_description: String,
    /// Free-text remediation recommendation.
    pub recommendation: String,
    /// Free-text management response.
    pub management_response: String,
    /// Free-text target date for remediation.
    pub target_date: String,
    /// Optional evidence reference (path, URL, or attachment id).
    pub evidence: Option<String>,
}

impl AssessmentItem {
    /// The pristine, ungraded item for a control.
    pub fn pristine(control_code: ControlCode) -> Self {
        Self {
            control_code,
            status: ItemStatus::default(),
            status_description: String::new(),
            recommendation: String::new(),
            management_response: String::new(),
            target_date: String::new(),
            evidence: None,
        }
    }

    /// Whether this item carries any grading progress: a non-default
    /// status or any non-empty free-text field.
    pub fn has_progress(&self) -> bool {
        self.status != ItemStatus::NotImplemented
            || !self.status_description.trim().is_empty()
            || !self.recommendation.trim().is_empty()
            || !self.management_response.trim().is_empty()
            || !self.target_date.trim().is_empty()
            || self.evidence.is_some()
    }

    /// Attach an evidence reference, enforcing the size ceiling.
    pub fn attach_evidence(&mut self, reference: impl Into<String>) -> Result<(), StoreError> {
        let reference = reference.into();
        if reference.len() > EVIDENCE_REF_MAX_BYTES {
            return Err(StoreError::Validation(format!(
                "evidence reference exceeds {EVIDENCE_REF_MAX_BYTES} bytes"
            )));
        }
        self.evidence = Some(reference);
        Ok(())
    }
}

/// An immutable deep snapshot of a live set, taken at reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// When the snapshot was taken.
    pub recorded_at: Timestamp,
    /// Full copy of the live set at that instant.
    pub items: Vec<AssessmentItem>,
}

/// Whether a framework's assessment run is underway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No run in progress.
    #[default]
    Idle,
    /// A run was initiated and not yet completed.
    InProgress,
}

/// One framework's complete assessment state for a tenant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentState {
    /// The live working copy being graded.
    pub live: Vec<AssessmentItem>,
    /// Append-only snapshot history; entries are never mutated or
    /// removed by any operation.
    pub history: Vec<AssessmentRecord>,
    /// The run-status flag.
    pub status: RunStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pristine_has_no_progress() {
        let item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        assert!(!item.has_progress());
    }

    #[test]
    fn test_status_counts_as_progress() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        item.status = ItemStatus::Implemented;
        assert!(item.has_progress());
    }

    #[test]
    fn test_not_applicable_counts_as_progress() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        item.status = ItemStatus::NotApplicable;
        assert!(item.has_progress());
    }

    #[test]
    fn test_text_counts_as_progress() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        item.recommendation = "Enable MFA".to_string();
        assert!(item.has_progress());
    }

    #[test]
    fn test_whitespace_text_is_not_progress() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        item.status_description = "   ".to_string();
        assert!(!item.has_progress());
    }

    #[test]
    fn test_evidence_counts_as_progress() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        item.attach_evidence("s3://bucket/mfa-screenshot.png").unwrap();
        assert!(item.has_progress());
    }

    #[test]
    fn test_oversized_evidence_rejected() {
        let mut item = AssessmentItem::pristine(ControlCode::from("1-1-1"));
        let huge = "x".repeat(EVIDENCE_REF_MAX_BYTES + 1);
        assert!(item.attach_evidence(huge).is_err());
        assert!(item.evidence.is_none());
    }

    #[test]
    fn test_default_state_is_idle_and_empty() {
        let state = AssessmentState::default();
        assert_eq!(state.status, RunStatus::Idle);
        assert!(state.live.is_empty());
        assert!(state.history.is_empty());
    }
}
