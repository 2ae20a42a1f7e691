// ── Core error types ──
//
// Section-level errors from the pipeline. Every variant is scoped to a
// single configuration section: nothing here may abort sibling sections.
// The `From<airlift_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Registry ─────────────────────────────────────────────────────
    #[error("Unknown device class: '{class}'")]
    UnknownDeviceClass { class: String },

    // ── Verification ─────────────────────────────────────────────────
    #[error("Validation failed for '{class}': {reason}")]
    ValidationFailed { class: String, reason: String },

    #[error("The '{class}' handler does not support configuration verification")]
    VerificationUnsupported { class: String },

    // ── Resolution ───────────────────────────────────────────────────
    #[error("Organization not found: '{name}'")]
    OrganizationNotFound { name: String },

    #[error("No organizations are reachable under this API key")]
    NoOrganizations,

    #[error("{count} organizations are reachable under this API key -- pass an organization name")]
    AmbiguousOrganization { count: usize },

    #[error("Network not found: '{name}'")]
    NetworkNotFound { name: String },

    #[error("No networks in organization {organization_id}")]
    NoNetworks { organization_id: String },

    #[error("{count} networks in organization {organization_id} -- pass a network name")]
    AmbiguousNetwork {
        organization_id: String,
        count: usize,
    },

    #[error("Device not found: '{name}'")]
    DeviceNotFound { name: String },

    // ── Translation ──────────────────────────────────────────────────
    #[error("Cannot translate field '{field}': {reason}")]
    TranslationError { field: String, reason: String },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Remote apply failed: {message}")]
    RemoteApplyError { message: String },

    #[error("Dashboard rejected the API key: {message}")]
    AuthenticationFailed { message: String },

    #[error("Dashboard API error: {message}")]
    Api { message: String },
}

impl CoreError {
    /// Returns `true` if this error was produced before any remote
    /// mutating call could have been made for the section.
    pub fn is_pre_apply(&self) -> bool {
        !matches!(self, Self::RemoteApplyError { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<airlift_api::Error> for CoreError {
    fn from(err: airlift_api::Error) -> Self {
        if err.is_auth() {
            CoreError::AuthenticationFailed {
                message: err.to_string(),
            }
        } else {
            CoreError::Api {
                message: err.to_string(),
            }
        }
    }
}
