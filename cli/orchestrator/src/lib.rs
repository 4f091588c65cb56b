#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Subcommand implementations behind the `tessera` binary.

use std::path::{Path, PathBuf};

use analysis::CompilerDiagnostics;
use config::Config;
use pipeline::PassReport;
use thiserror::Error;

/// Errors that can occur during Tessera operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// The wrapper pass or model I/O failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// Configuration could not be loaded or written.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Filesystem error outside of model and config handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// `validate` found consistency errors in the model.
    #[error("{} validation error(s) in {}", .count, .path.display())]
    Invalid {
        /// Model that was checked
        path: PathBuf,
        /// Number of errors reported
        count: usize,
    },
}

/// Result type alias for Tessera CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Run the wrapper pass from `input` (or the configured input path) into
/// `output` (or the configured output path)
pub fn rewrite(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &Config,
) -> Result<PassReport> {
    let input = input.unwrap_or(config.codegen.input_path.as_path());
    let output = output.unwrap_or(config.codegen.output_path.as_path());
    tracing::info!(input = %input.display(), output = %output.display(), "running wrapper pass");

    Ok(pipeline::run_file(input, output, config)?)
}

/// Check a model file, failing when it has consistency errors
pub fn validate(input: &Path) -> Result<CompilerDiagnostics> {
    let diagnostics = pipeline::validate_file(input)?;
    for error in &diagnostics.errors {
        tracing::error!(model = %input.display(), "{}", error);
    }
    for warning in &diagnostics.warnings {
        tracing::warn!(model = %input.display(), "{}", warning);
    }

    if diagnostics.has_errors() {
        return Err(CliError::Invalid {
            path: input.to_path_buf(),
            count: diagnostics.errors.len(),
        });
    }
    Ok(diagnostics)
}

/// Write the default configuration to `path`, or to the default location.
///
/// # Returns
///
/// Returns the path that was written
pub fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Config::default().save(&path)?;
    Ok(path)
}
