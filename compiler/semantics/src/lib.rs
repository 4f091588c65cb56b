#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Semantic construction of wrapper types.
//!
//! Decides what a polling handle or page iterator for a given method looks
//! like. Nothing here touches the type registry: the factory only builds
//! candidates, and deduplication is left to the caller.

/// Identifier normalization consumed from the naming service
pub mod naming;
/// Construction of polling handles and page iterators from methods
pub mod wrapper_factory;

pub use naming::{IdentifierNaming, PascalCaseNaming};
pub use wrapper_factory::{WrapperTypeFactory, LIST_ALL_SUFFIX};

/// Errors that can occur while building wrapper types.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    /// A method was handed to a construction path it does not qualify for.
    ///
    /// This is a contract violation by the driver, not a recoverable
    /// condition.
    #[error("precondition violated for `{method}`: requires {requirement}")]
    Precondition {
        /// Qualified name of the offending method
        method: String,
        /// What the construction path required
        requirement: &'static str,
    },
    /// Two methods normalize to one polling handle identity but resolve to
    /// different result types.
    #[error(
        "polling handle `{name}` for `{method}` would resolve to the result type of `{existing}`"
    )]
    HandleConflict {
        /// Shared synthesized name
        name: String,
        /// Qualified name of the method being rewritten
        method: String,
        /// Qualified name of the method the handle was synthesized for first
        existing: String,
    },
}

/// Result type for wrapper construction.
pub type Result<T> = std::result::Result<T, SemanticError>;
