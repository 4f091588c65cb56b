#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Tessera Model Analysis
//!
//! Consistency checks over a [`registry::ServiceDescription`]. The wrapper
//! pass runs them after rewriting so a renderer never receives a model with
//! dangling wrapper references.

pub mod validator;

pub use validator::ModelValidator;

/// Diagnostics collected while analysing a model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerDiagnostics {
    /// Problems that make the model unusable
    pub errors: Vec<String>,
    /// Risks worth surfacing that do not block generation
    pub warnings: Vec<String>,
}

impl CompilerDiagnostics {
    /// Run every check the validator knows about
    pub fn collect(service: &registry::ServiceDescription) -> Self {
        let validator = ModelValidator::new();
        Self { errors: validator.validate(service), warnings: validator.name_collisions(service) }
    }

    /// Whether any error was found
    pub fn has_errors(&self) -> bool { !self.errors.is_empty() }
}
