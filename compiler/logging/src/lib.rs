#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the compiler.
//!
//! Library crates emit through `tracing` macros; binaries call [`init`] once
//! to install a subscriber.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber, additionally appending plain-text
/// events to `file` when one is given.
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is
/// harmless: later calls leave the first subscriber in place and report
/// that through it at debug level.
pub fn init(level: &str, file: Option<&Path>) -> std::io::Result<()> {
    let file_layer = match file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    if let Err(e) = installed {
        tracing::debug!(level, error = %e, "subscriber already installed, keeping it");
    }
    Ok(())
}

/// Filter used by [`init`]: `RUST_LOG` if set and valid, else `level`,
/// falling back to `info` when `level` does not parse.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Emits a trace event tagged with a module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
