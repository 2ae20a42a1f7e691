// airlift-core: the configuration resolution and verification pipeline.
//
// Control flow: decoded document → verification gate (per section, via
// the handler registry) → apply orchestrator (per section: translate →
// resolve → apply) → vendor management API.

pub mod convert;
pub mod document;
pub mod error;
pub mod gate;
pub mod handler;
pub mod model;
pub mod orchestrator;
pub mod payload;
pub mod registry;
pub mod resolver;
pub mod vendors;

// ── Primary re-exports ──────────────────────────────────────────────
pub use document::{ConfigDocument, DeviceSection, RESERVED_DIRECTIVE_KEY};
pub use error::CoreError;
pub use gate::{GateReport, SectionVerdict, VerificationGate};
pub use handler::{ApHandler, ApState, AppliedUpdate, SecurityMode, Verification};
pub use model::{Device, Network, Organization};
pub use orchestrator::{ApplyOrchestrator, ApplyReport, SectionOutcome, SectionResult};
pub use payload::NativeUpdatePayload;
pub use registry::{HandlerDescriptor, HandlerRegistry, builtin_registry};
pub use resolver::{
    AccountContext, DEFAULT_DEVICE_INDEX, DeviceResolver, DeviceSelector, ManagementApi,
    ResolveRequest,
};
