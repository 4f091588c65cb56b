//! Pipeline orchestration for the main entry points.
//!
//! The generation driver walks every method of a service once, in
//! declaration order, and hands it to the [`MethodRewriter`]. The pass is
//! all-or-nothing: it runs on a working copy that replaces the caller's
//! description only when every method was rewritten and the result
//! validated.

use std::path::Path;

use analysis::CompilerDiagnostics;
use config::{Config, GenerationConfig};
use registry::ServiceDescription;
use semantics::{IdentifierNaming, PascalCaseNaming};

use crate::method_rewriter::{MethodRewriter, RewriteOutcome};
use crate::{PipelineError, Result};

/// Summary of one wrapper pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Methods visited
    pub methods: usize,
    /// Methods wrapped in a page iterator only
    pub paged: usize,
    /// Methods wrapped in a polling handle only
    pub long_running: usize,
    /// Methods given the composed paginated long-running response
    pub paged_long_running: usize,
    /// Registry members added by the pass
    pub types_added: usize,
    /// Non-fatal diagnostics about the rewritten model
    pub warnings: Vec<String>,
}

impl PassReport {
    fn record(&mut self, outcome: &RewriteOutcome) {
        self.methods += 1;
        match outcome {
            RewriteOutcome::Unchanged => {}
            RewriteOutcome::Paged { .. } => self.paged += 1,
            RewriteOutcome::LongRunning { .. } => self.long_running += 1,
            RewriteOutcome::PagedLongRunning(_) => self.paged_long_running += 1,
        }
    }

    /// Methods whose return type was replaced
    pub fn rewritten(&self) -> usize { self.paged + self.long_running + self.paged_long_running }
}

/// Run the wrapper pass over `service`.
///
/// Each method is rewritten exactly once, with wrapper kinds disabled in
/// `config` masked out of its classification. On error `service` is left
/// exactly as it was.
///
/// # Returns
///
/// Returns a [`PassReport`] describing what changed
pub fn run_pass<N: IdentifierNaming>(
    service: &mut ServiceDescription,
    config: &GenerationConfig,
    naming: N,
) -> Result<PassReport> {
    let rewriter = MethodRewriter::new(naming);
    let mut working = service.clone();
    let types_before = working.types().len();
    let mut report = PassReport::default();

    {
        let (methods, types) = working.parts_mut();
        for method in methods.iter_mut() {
            let kind = method.kind.masked(config.page_wrappers, config.long_running_wrappers);
            let outcome = rewriter.rewrite_as(method, kind, types)?;
            report.record(&outcome);
        }
    }

    let diagnostics = CompilerDiagnostics::collect(&working);
    if diagnostics.has_errors() {
        return Err(PipelineError::Validation(diagnostics.errors));
    }
    for warning in &diagnostics.warnings {
        tracing::warn!(service = %working.name, "{}", warning);
    }

    report.types_added = working.types().len() - types_before;
    report.warnings = diagnostics.warnings;
    *service = working;

    tracing::info!(
        service = %service.name,
        methods = report.methods,
        rewritten = report.rewritten(),
        types_added = report.types_added,
        "wrapper pass complete"
    );
    Ok(report)
}

/// Load a service description from `input`, run the pass with the default
/// naming service and write the result to `output`
pub fn run_file(input: &Path, output: &Path, config: &Config) -> Result<PassReport> {
    logging::trace("pipeline", &format!("loading model from {}", input.display()));
    let mut service = ServiceDescription::from_file(input)?;
    tracing::debug!(input = %input.display(), methods = service.methods().len(), "loaded model");

    let report = run_pass(&mut service, &config.generation, PascalCaseNaming)?;
    service.to_file(output)?;
    tracing::debug!(output = %output.display(), "wrote model");
    Ok(report)
}

/// Load a service description and run the consistency checks on it
pub fn validate_file(input: &Path) -> Result<CompilerDiagnostics> {
    logging::trace("pipeline", &format!("validating model {}", input.display()));
    let service = ServiceDescription::from_file(input)?;
    Ok(CompilerDiagnostics::collect(&service))
}
