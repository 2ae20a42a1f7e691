// ── Apply orchestrator ──
//
// Second pass: drives create_config for every section the gate
// verified. Sections run strictly in document order, one at a time --
// the management API documents no concurrency guarantees for
// simultaneous updates, so serializing avoids lost-update races
// without locking. Errors are caught at the section boundary; one bad
// device class never prevents the others from being configured.

use std::sync::Arc;

use tracing::{error, info};

use crate::document::{ConfigDocument, DeviceSection};
use crate::error::CoreError;
use crate::gate::{GateReport, SectionVerdict, VerificationGate};
use crate::handler::AppliedUpdate;
use crate::registry::HandlerRegistry;
use crate::resolver::ManagementApi;

/// What happened to one section.
#[derive(Debug)]
pub enum SectionResult {
    /// Verified and pushed to the management plane.
    Applied(AppliedUpdate),
    /// Rejected by the verification gate; no apply was attempted.
    Rejected(CoreError),
    /// Verified, but the apply chain failed.
    Failed(CoreError),
}

/// Per-section outcome, in document order.
#[derive(Debug)]
pub struct SectionOutcome {
    pub class: String,
    pub result: SectionResult,
}

/// Itemized results for a whole run.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<SectionOutcome>,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, SectionResult::Applied(_)))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, SectionResult::Rejected(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, SectionResult::Failed(_)))
            .count()
    }

    /// `true` when at least one section was attempted and none applied.
    /// A document with no device sections is a clean run, not a failure.
    pub fn nothing_applied(&self) -> bool {
        !self.outcomes.is_empty() && self.applied_count() == 0
    }
}

/// Top-level driver: gate, then apply the verified set.
pub struct ApplyOrchestrator<'a> {
    registry: &'a HandlerRegistry,
    api: Arc<dyn ManagementApi>,
}

impl<'a> ApplyOrchestrator<'a> {
    pub fn new(registry: &'a HandlerRegistry, api: Arc<dyn ManagementApi>) -> Self {
        Self { registry, api }
    }

    /// Run the full two-pass pipeline: verification gate, then apply.
    ///
    /// The passes are separate by design -- a verification error can
    /// never trigger a partial apply of its section.
    pub async fn run(&self, document: &ConfigDocument) -> ApplyReport {
        let gate = VerificationGate::new(self.registry, Arc::clone(&self.api));
        let report = gate.verify_document(document).await;
        self.apply_verified(document, report).await
    }

    /// Apply every section the gate verified, strictly in document
    /// order. Gate rejections carry through into the report unchanged.
    pub async fn apply_verified(
        &self,
        document: &ConfigDocument,
        gate_report: GateReport,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (class, verdict) in gate_report.into_verdicts() {
            let result = match verdict {
                SectionVerdict::Rejected(err) => SectionResult::Rejected(err),
                SectionVerdict::Verified => match self.apply_section(&class, document).await {
                    Ok(update) => {
                        info!(
                            class,
                            network_id = update.network_id,
                            device_index = update.device_index,
                            "section applied"
                        );
                        SectionResult::Applied(update)
                    }
                    Err(err) => {
                        error!(class, %err, "section apply failed");
                        SectionResult::Failed(err)
                    }
                },
            };
            report.outcomes.push(SectionOutcome { class, result });
        }

        report
    }

    async fn apply_section(
        &self,
        class: &str,
        document: &ConfigDocument,
    ) -> Result<AppliedUpdate, CoreError> {
        // Both lookups succeeded at the gate; failures here mean the
        // caller paired the report with a different document.
        let raw = document.get(class).ok_or_else(|| CoreError::ValidationFailed {
            class: class.to_owned(),
            reason: "section missing from document".to_owned(),
        })?;
        let section = DeviceSection::from_value(class, raw)?;
        let handler = self.registry.lookup(class)?.instantiate(Arc::clone(&self.api));

        handler.create_config(&section).await
    }
}
