//! # Template Catalog
//!
//! The pristine per-framework item sets a live assessment is reset to.
//! Built-in defaults ship as embedded YAML; tenants can install their
//! own catalogs through the override API. Template items are always
//! ungraded — grading progress only ever exists in a live set.

use std::collections::BTreeMap;

use grc_core::{ComplianceFramework, ControlCode};
use grc_store::AssessmentItem;

use crate::error::AssessmentError;

const BUILTIN_CATALOG: &str = include_str!("../templates/catalog.yaml");

/// Pristine control-code sets, keyed by framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    sets: BTreeMap<ComplianceFramework, Vec<ControlCode>>,
}

impl TemplateCatalog {
    /// The built-in catalog parsed from the embedded YAML.
    ///
    /// # Errors
    ///
    /// Fails when the embedded catalog is malformed or leaves a
    /// framework without an item set.
    pub fn builtin() -> Result<Self, AssessmentError> {
        let sets: BTreeMap<ComplianceFramework, Vec<ControlCode>> =
            serde_yaml::from_str(BUILTIN_CATALOG)
                .map_err(|e| AssessmentError::Catalog(e.to_string()))?;
        let catalog = Self { sets };
        for framework in ComplianceFramework::all() {
            if catalog.codes(*framework).is_none() {
                return Err(AssessmentError::TemplateMissing(*framework));
            }
        }
        Ok(catalog)
    }

    /// An empty catalog, for tenants installing every set themselves.
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Install or replace one framework's control-code set.
    ///
    /// # Errors
    ///
    /// Rejects an empty list or duplicate control codes.
    pub fn install(
        &mut self,
        framework: ComplianceFramework,
        codes: Vec<ControlCode>,
    ) -> Result<(), AssessmentError> {
        if codes.is_empty() {
            return Err(AssessmentError::Validation(format!(
                "template set for {framework} must not be empty"
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for code in &codes {
            if !seen.insert(code) {
                return Err(AssessmentError::Validation(format!(
                    "template set for {framework} contains duplicate control {code}"
                )));
            }
        }
        self.sets.insert(framework, codes);
        Ok(())
    }

    /// One framework's control codes, if a set is installed.
    pub fn codes(&self, framework: ComplianceFramework) -> Option<&[ControlCode]> {
        self.sets.get(&framework).map(Vec::as_slice)
    }

    /// A fresh pristine item set for a framework — every item ungraded.
    ///
    /// # Errors
    ///
    /// Fails when no set is installed for the framework.
    pub fn pristine_set(
        &self,
        framework: ComplianceFramework,
    ) -> Result<Vec<AssessmentItem>, AssessmentError> {
        let codes = self
            .codes(framework)
            .ok_or(AssessmentError::TemplateMissing(framework))?;
        Ok(codes
            .iter()
            .cloned()
            .map(AssessmentItem::pristine)
            .collect())
    }
}
