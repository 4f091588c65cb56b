#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Tessera Intermediate Representation (IR)
//!
//! This crate defines the language-neutral model a service description is
//! parsed into: the model types it declares and the methods that return them.
//! Wrapper types for long-running and paginated operations are variants of the
//! same [`ModelType`] union so that a single registry can hold every type a
//! renderer has to emit.

pub mod method;
pub mod model_type;

// Re-export the main IR types for convenience
pub use method::*;
pub use model_type::*;
