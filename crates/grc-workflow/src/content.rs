//! # Content Generation Interface
//!
//! The external AI content-generation service, as seen from the core:
//! given a control, it returns a three-part document body. The core's
//! only validation is that the three parts are present and non-blank;
//! content itself is opaque.

use grc_core::ControlCode;
use grc_store::DocumentBody;

use crate::error::WorkflowError;

/// External document body generator.
pub trait ContentGenerator: Send + Sync {
    /// Produce the three-part body for a control.
    fn generate(&self, control_id: &ControlCode, title: &str) -> Result<DocumentBody, WorkflowError>;
}

/// A generator returning a fixed body. Test and demo support.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    body: DocumentBody,
}

impl StaticGenerator {
    /// A generator that always returns `body`.
    pub fn new(body: DocumentBody) -> Self {
        Self { body }
    }
}

impl ContentGenerator for StaticGenerator {
    fn generate(&self, _control_id: &ControlCode, _title: &str) -> Result<DocumentBody, WorkflowError> {
        Ok(self.body.clone())
    }
}

/// A deterministic generator producing a boilerplate three-part body
/// from the control and title. The fallback when no external generation
/// service is wired in.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldGenerator;

impl ContentGenerator for ScaffoldGenerator {
    fn generate(&self, control_id: &ControlCode, title: &str) -> Result<DocumentBody, WorkflowError> {
        Ok(DocumentBody {
            purpose: format!(
                "This policy establishes the organization's position on '{title}' \
                 in fulfilment of control {control_id}."
            ),
            policy: format!(
                "The organization commits to implementing and maintaining the \
                 measures required by control {control_id}. Compliance is mandatory \
                 for all personnel and systems in scope."
            ),
            procedures: format!(
                "1. Assign an owner for control {control_id}.\n\
                 2. Document the implementation evidence.\n\
                 3. Review this policy at least annually and after material changes."
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_body_passes_validation() {
        let body = ScaffoldGenerator
            .generate(&ControlCode::from("2-1-3"), "Access Control")
            .unwrap();
        assert!(body.validate().is_ok());
        assert!(body.purpose.contains("2-1-3"));
    }

    #[test]
    fn test_static_generator_returns_body() {
        let body = DocumentBody {
            purpose: "p".to_string(),
            policy: "q".to_string(),
            procedures: "r".to_string(),
        };
        let generator = StaticGenerator::new(body.clone());
        let produced = generator.generate(&ControlCode::from("1-1-1"), "t").unwrap();
        assert_eq!(produced, body);
    }
}
