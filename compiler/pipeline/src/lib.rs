#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Wrapper synthesis pipeline.
//!
//! Drives the pass that gives every long-running method a polling handle and
//! every paginated method a page iterator, sharing wrappers across methods
//! through the service's type registry.
//!
//! ## Module Organization
//!
//! - `method_rewriter` - Per-method rewrite of the declared return type
//! - `orchestration` - Main pipeline entry points (`run_pass`, `run_file`, `validate_file`)

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the wrapper pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A method was routed to a wrapper it does not qualify for.
    #[error(transparent)]
    Semantic(#[from] semantics::SemanticError),
    /// Error from the registry, including model file I/O.
    #[error(transparent)]
    Registry(#[from] registry::RegistryError),
    /// Error loading configuration.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The rewritten model failed consistency checks.
    #[error("model failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// Module declarations
pub mod method_rewriter;
pub mod orchestration;

// Re-export public API
pub use method_rewriter::{MethodRewriter, RewriteOutcome};
pub use orchestration::{run_file, run_pass, validate_file, PassReport};
