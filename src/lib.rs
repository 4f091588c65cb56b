// SPDX-License-Identifier: CC0-1.0

//! Tessera umbrella crate.
//!
//! This crate primarily serves as the workspace root.
//!
//! The model lives in `primitives/ir` and `primitives/registry`, the wrapper
//! synthesis pass in `compiler/semantics` and `compiler/pipeline`, and the
//! `tessera` binary in `cli/orchestrator`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

/// Miscellaneous metadata about the Tessera workspace.
pub mod tessera_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
