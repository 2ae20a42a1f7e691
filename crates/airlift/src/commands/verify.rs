//! `airlift verify` -- run the verification gate without applying.

use std::sync::Arc;

use airlift_core::{HandlerRegistry, ManagementApi, VerificationGate};
use tracing::debug;

use crate::cli::{GlobalOpts, VerifyArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    registry: &HandlerRegistry,
    api: Arc<dyn ManagementApi>,
    args: VerifyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let document = super::util::read_document(&args.file)?;
    debug!(sections = document.len(), "document decoded");

    let gate = VerificationGate::new(registry, api);
    let report = gate.verify_document(&document).await;

    output::print_output(&output::render_gate_report(&report), global.quiet);

    let rejected = report.rejected_count();
    if rejected > 0 {
        return Err(CliError::VerificationFailed { count: rejected });
    }
    Ok(())
}
