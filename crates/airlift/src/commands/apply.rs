//! `airlift apply` -- verify, then apply every section that passed.

use std::sync::Arc;

use airlift_core::{ApplyOrchestrator, HandlerRegistry, ManagementApi};
use tracing::debug;

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    registry: &HandlerRegistry,
    api: Arc<dyn ManagementApi>,
    args: ApplyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let document = super::util::read_document(&args.file)?;
    debug!(sections = document.len(), "document decoded");

    let orchestrator = ApplyOrchestrator::new(registry, api);
    let report = orchestrator.run(&document).await;

    output::print_output(&output::render_apply_report(&report), global.quiet);

    // A run where every section was rejected or failed is a failed run.
    // An empty document (or reserved directives only) is a clean one.
    if report.nothing_applied() {
        return Err(CliError::NothingApplied {
            rejected: report.rejected_count(),
            failed: report.failed_count(),
        });
    }
    Ok(())
}
