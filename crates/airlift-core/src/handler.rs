// ── Handler contract ──
//
// The capability set every vendor handler implements. Handlers are
// dyn-dispatched through this trait so the gate and orchestrator can
// drive heterogeneous vendor backends without knowing any of them.

use async_trait::async_trait;

use crate::document::DeviceSection;
use crate::error::CoreError;
use crate::payload::NativeUpdatePayload;

// ── Security modes ───────────────────────────────────────────────────

/// Vendor-neutral encryption modes accepted in the `security` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SecurityMode {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
}

impl SecurityMode {
    /// Parse a document value. Matching is case-insensitive; documents
    /// conventionally use lowercase (`wpa2`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "wep" => Some(Self::Wep),
            "wpa" => Some(Self::Wpa),
            "wpa2" => Some(Self::Wpa2),
            "wpa3" => Some(Self::Wpa3),
            _ => None,
        }
    }

    /// The canonical document spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Wep => "wep",
            Self::Wpa => "wpa",
            Self::Wpa2 => "wpa2",
            Self::Wpa3 => "wpa3",
        }
    }

    /// Whether this mode is meaningless without a passkey.
    pub fn requires_passkey(self) -> bool {
        !matches!(self, Self::Open)
    }
}

// ── Device state ─────────────────────────────────────────────────────

/// Device-side state a handler tracks across direct mutator calls.
/// Freshly constructed handlers start empty -- nothing is assumed about
/// the remote device until an update succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApState {
    pub ssid: String,
    pub security: String,
    pub pmf: String,
    pub broadcasting: bool,
}

// ── Verification outcome ─────────────────────────────────────────────

/// Outcome of static configuration verification.
///
/// `Unsupported` means the handler has no verification capability for
/// this configuration. The gate treats it exactly like `Failed`: an
/// unverifiable section never reaches the apply phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Passed,
    Failed { reason: String },
    Unsupported,
}

impl Verification {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Shorthand for a failure with a formatted reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

// ── Applied update record ────────────────────────────────────────────

/// Record of a successfully pushed update, returned by `create_config`
/// for reporting. Carries no ownership beyond the section that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedUpdate {
    pub network_id: String,
    pub device_index: usize,
    pub payload: NativeUpdatePayload,
}

// ── The contract ─────────────────────────────────────────────────────

/// Capability set of a vendor handler.
///
/// `verify_config` and `unpack_data` must be free of mutating side
/// effects; `create_config` is the single entry point that may push an
/// update to the remote management plane, and only for a section the
/// gate has already verified.
#[async_trait]
pub trait ApHandler: Send + Sync {
    /// The device-class key this handler serves.
    fn device_class(&self) -> &'static str;

    /// Statically verify a vendor-neutral section.
    ///
    /// May perform read-only listing calls (e.g. to confirm a named
    /// device exists) but must never mutate remote state. Remote
    /// listing failures propagate as errors; both outcomes block apply.
    async fn verify_config(&self, section: &DeviceSection) -> Result<Verification, CoreError>;

    /// Translate vendor-neutral fields into the native update schema.
    ///
    /// Deterministic and idempotent: the same section always yields the
    /// same payload. Unrecognized fields are dropped, not rejected, so
    /// newer documents keep working against older handlers. Recognized
    /// fields with malformed values are a [`CoreError::TranslationError`].
    fn unpack_data(&self, section: &DeviceSection) -> Result<NativeUpdatePayload, CoreError>;

    /// Apply an already-verified section: translate, resolve the target
    /// network and device, push the native update.
    async fn create_config(&self, section: &DeviceSection) -> Result<AppliedUpdate, CoreError>;

    /// Direct mutator: change the broadcast SSID on a network.
    async fn change_ssid(&mut self, network_id: &str, ssid: &str) -> Result<(), CoreError>;

    /// Direct mutator: change the security mode (and passkey) on a network.
    async fn change_security(
        &mut self,
        network_id: &str,
        security: SecurityMode,
        passkey: Option<&str>,
    ) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_mode_parsing() {
        assert_eq!(SecurityMode::parse("wpa2"), Some(SecurityMode::Wpa2));
        assert_eq!(SecurityMode::parse("WPA2"), Some(SecurityMode::Wpa2));
        assert_eq!(SecurityMode::parse("open"), Some(SecurityMode::Open));
        assert_eq!(SecurityMode::parse("wpa4"), None);
    }

    #[test]
    fn only_open_mode_works_without_a_passkey() {
        assert!(!SecurityMode::Open.requires_passkey());
        assert!(SecurityMode::Wep.requires_passkey());
        assert!(SecurityMode::Wpa2.requires_passkey());
        assert!(SecurityMode::Wpa3.requires_passkey());
    }

    #[test]
    fn fresh_state_is_empty() {
        let state = ApState::default();
        assert_eq!(state.ssid, "");
        assert_eq!(state.security, "");
        assert!(!state.broadcasting);
    }
}
