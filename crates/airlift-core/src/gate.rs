// ── Verification gate ──
//
// First pass over a configuration document. Every non-reserved section
// starts Unverified and transitions to Verified only when its registry
// lookup succeeds AND its handler's verify_config passes. The gate is
// per-section: a malformed section never blocks valid siblings. The
// gate performs no mutating remote calls.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::document::{ConfigDocument, DeviceSection, RESERVED_DIRECTIVE_KEY};
use crate::error::CoreError;
use crate::handler::Verification;
use crate::registry::HandlerRegistry;
use crate::resolver::ManagementApi;

/// Per-section verification verdict.
#[derive(Debug)]
pub enum SectionVerdict {
    Verified,
    Rejected(CoreError),
}

impl SectionVerdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Verdicts for every non-reserved section, in document order.
#[derive(Debug, Default)]
pub struct GateReport {
    verdicts: IndexMap<String, SectionVerdict>,
}

impl GateReport {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionVerdict)> {
        self.verdicts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the report, yielding owned verdicts in document order.
    pub fn into_verdicts(self) -> impl Iterator<Item = (String, SectionVerdict)> {
        self.verdicts.into_iter()
    }

    /// Device classes that passed verification, in document order.
    pub fn verified_classes(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, verdict)| verdict.is_verified())
            .map(|(class, _)| class)
    }

    /// Rejected sections with the error that blocked each.
    pub fn rejections(&self) -> impl Iterator<Item = (&str, &CoreError)> {
        self.iter().filter_map(|(class, verdict)| match verdict {
            SectionVerdict::Rejected(err) => Some((class, err)),
            SectionVerdict::Verified => None,
        })
    }

    pub fn verified_count(&self) -> usize {
        self.verified_classes().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejections().count()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// Runs verification across a document.
pub struct VerificationGate<'a> {
    registry: &'a HandlerRegistry,
    api: Arc<dyn ManagementApi>,
}

impl<'a> VerificationGate<'a> {
    pub fn new(registry: &'a HandlerRegistry, api: Arc<dyn ManagementApi>) -> Self {
        Self { registry, api }
    }

    /// Verify every non-reserved section, in document order.
    ///
    /// A failed registry lookup, a non-mapping section, a handler that
    /// reports failure or unsupported verification, and a remote
    /// listing error all produce the same effect: the section is
    /// rejected and excluded from the apply set.
    pub async fn verify_document(&self, document: &ConfigDocument) -> GateReport {
        let mut report = GateReport::default();

        for (class, raw) in document.iter() {
            if class == RESERVED_DIRECTIVE_KEY {
                debug!("skipping reserved directive section");
                continue;
            }

            let verdict = self.verify_section(class, raw).await;
            match &verdict {
                SectionVerdict::Verified => info!(class, "section verified"),
                SectionVerdict::Rejected(err) => warn!(class, %err, "section rejected"),
            }
            report.verdicts.insert(class.to_owned(), verdict);
        }

        report
    }

    async fn verify_section(&self, class: &str, raw: &serde_json::Value) -> SectionVerdict {
        let descriptor = match self.registry.lookup(class) {
            Ok(descriptor) => descriptor,
            Err(err) => return SectionVerdict::Rejected(err),
        };

        let section = match DeviceSection::from_value(class, raw) {
            Ok(section) => section,
            Err(err) => return SectionVerdict::Rejected(err),
        };

        let handler = descriptor.instantiate(Arc::clone(&self.api));
        match handler.verify_config(&section).await {
            Ok(Verification::Passed) => SectionVerdict::Verified,
            Ok(Verification::Failed { reason }) => {
                SectionVerdict::Rejected(CoreError::ValidationFailed {
                    class: class.to_owned(),
                    reason,
                })
            }
            Ok(Verification::Unsupported) => {
                SectionVerdict::Rejected(CoreError::VerificationUnsupported {
                    class: class.to_owned(),
                })
            }
            Err(err) => SectionVerdict::Rejected(err),
        }
    }
}
