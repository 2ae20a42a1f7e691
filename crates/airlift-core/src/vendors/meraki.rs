// ── Meraki MR45 handler ──
//
// Serves the `cisco` device class. Translates vendor-neutral fields
// into the Meraki dashboard's SSID update schema and pushes updates
// through the management API seam.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::document::{DeviceSection, fields};
use crate::error::CoreError;
use crate::handler::{ApHandler, ApState, AppliedUpdate, SecurityMode, Verification};
use crate::payload::NativeUpdatePayload;
use crate::registry::HandlerDescriptor;
use crate::resolver::{DeviceResolver, ManagementApi, ResolveRequest};

/// Device-class key this handler is registered under.
pub const DEVICE_CLASS: &str = "cisco";

/// Minimum bitrates (Mbps) the dashboard accepts for `minBitrate`.
const ACCEPTED_BITRATES: [f64; 12] = [
    1.0, 2.0, 5.5, 6.0, 9.0, 11.0, 12.0, 18.0, 24.0, 36.0, 48.0, 54.0,
];

/// Handler for Meraki MR45 access points.
pub struct MerakiMr45 {
    api: Arc<dyn ManagementApi>,
    state: ApState,
}

impl MerakiMr45 {
    pub fn new(api: Arc<dyn ManagementApi>) -> Self {
        Self {
            api,
            state: ApState::default(),
        }
    }

    /// Registry descriptor for this handler.
    pub fn descriptor() -> HandlerDescriptor {
        HandlerDescriptor::new(DEVICE_CLASS, |api| Box::new(Self::new(api)))
    }

    /// Device-side state tracked across direct mutator calls.
    pub fn state(&self) -> &ApState {
        &self.state
    }

    /// Validate and normalize a `bitrate` value into the dashboard's
    /// `minBitrate` number. Accepts JSON numbers and numeric strings.
    fn translate_bitrate(value: &Value) -> Result<Value, CoreError> {
        let rate = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| CoreError::TranslationError {
            field: fields::BITRATE.to_owned(),
            reason: format!("expected a numeric bitrate, got {value}"),
        })?;

        if !ACCEPTED_BITRATES.contains(&rate) {
            return Err(CoreError::TranslationError {
                field: fields::BITRATE.to_owned(),
                reason: format!("{rate} Mbps is not an accepted minimum bitrate"),
            });
        }

        Ok(json!(rate))
    }

    /// Validate a boolean field, rejecting truthy strings -- the
    /// dashboard treats any non-boolean as an error after the fact, so
    /// catch it before any remote call.
    fn translate_bool(field: &str, value: &Value) -> Result<Value, CoreError> {
        value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| CoreError::TranslationError {
                field: field.to_owned(),
                reason: format!("expected true or false, got {value}"),
            })
    }

    async fn push(
        &self,
        network_id: &str,
        device_index: usize,
        payload: &NativeUpdatePayload,
    ) -> Result<(), CoreError> {
        self.api
            .update_ssid(network_id, device_index, payload)
            .await
            .map_err(|e| CoreError::RemoteApplyError {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl ApHandler for MerakiMr45 {
    fn device_class(&self) -> &'static str {
        DEVICE_CLASS
    }

    async fn verify_config(&self, section: &DeviceSection) -> Result<Verification, CoreError> {
        debug!("verifying section");

        // The update call needs a locatable network.
        if !section.has_resolvable_target() {
            return Ok(Verification::failed(format!(
                "no resolvable target: set '{}' or '{}'",
                fields::NETWORK_ID,
                fields::NETWORK
            )));
        }

        // Recognized on other product lines, not configurable on this one.
        if section.contains(fields::PMF) {
            return Ok(Verification::failed(format!(
                "'{}' is not supported on this device class",
                fields::PMF
            )));
        }

        if let Some(raw) = section.get(fields::SECURITY) {
            let Some(mode) = raw.as_str().and_then(SecurityMode::parse) else {
                return Ok(Verification::failed(format!(
                    "unknown security mode: {raw}"
                )));
            };
            if mode.requires_passkey() && !section.contains(fields::KEY) {
                return Ok(Verification::failed(format!(
                    "security '{}' requires a '{}' field",
                    mode.as_str(),
                    fields::KEY
                )));
            }
        }

        // Read-only existence check for a named device. Listing is the
        // only remote traffic verification may generate.
        if let Some(device_name) = section.device() {
            let request = ResolveRequest::from_section(section);
            match DeviceResolver::new(self.api.as_ref()).resolve(&request).await {
                Ok(_) => {}
                Err(CoreError::DeviceNotFound { name }) => {
                    return Ok(Verification::failed(format!("device '{name}' not found")));
                }
                Err(other) => return Err(other),
            }
            trace!(device_name, "named device exists");
        }

        Ok(Verification::Passed)
    }

    fn unpack_data(&self, section: &DeviceSection) -> Result<NativeUpdatePayload, CoreError> {
        let mut payload = NativeUpdatePayload::new();

        for (field, value) in section.iter() {
            match field {
                fields::SSID => payload.insert("name", value.clone()),
                fields::SECURITY => payload.insert("wpaEncryptionMode", value.clone()),
                fields::KEY => payload.insert("psk", value.clone()),
                fields::BITRATE => payload.insert("minBitrate", Self::translate_bitrate(value)?),
                fields::ENABLED => {
                    payload.insert("enabled", Self::translate_bool(field, value)?);
                }
                fields::VISIBLE => {
                    payload.insert("visible", Self::translate_bool(field, value)?);
                }
                // Resolution fields address the update; they are not
                // part of the update body.
                fields::NETWORK_ID
                | fields::ORGANIZATION
                | fields::NETWORK
                | fields::DEVICE => {}
                other => trace!(field = other, "dropping unrecognized field"),
            }
        }

        Ok(payload)
    }

    async fn create_config(&self, section: &DeviceSection) -> Result<AppliedUpdate, CoreError> {
        let payload = self.unpack_data(section)?;
        let request = ResolveRequest::from_section(section);
        let target = DeviceResolver::new(self.api.as_ref()).resolve(&request).await?;

        debug!(
            network_id = target.network_id,
            device_index = target.device_index,
            fields = payload.len(),
            "pushing ssid update"
        );
        self.push(&target.network_id, target.device_index, &payload).await?;

        Ok(AppliedUpdate {
            network_id: target.network_id,
            device_index: target.device_index,
            payload,
        })
    }

    async fn change_ssid(&mut self, network_id: &str, ssid: &str) -> Result<(), CoreError> {
        let mut payload = NativeUpdatePayload::new();
        payload.insert("name", json!(ssid));

        self.push(network_id, crate::resolver::DEFAULT_DEVICE_INDEX, &payload)
            .await?;
        self.state.ssid = ssid.to_owned();
        self.state.broadcasting = true;
        Ok(())
    }

    async fn change_security(
        &mut self,
        network_id: &str,
        security: SecurityMode,
        passkey: Option<&str>,
    ) -> Result<(), CoreError> {
        if security.requires_passkey() && passkey.is_none() {
            return Err(CoreError::ValidationFailed {
                class: DEVICE_CLASS.to_owned(),
                reason: format!("security '{}' requires a passkey", security.as_str()),
            });
        }

        let mut payload = NativeUpdatePayload::new();
        payload.insert("wpaEncryptionMode", json!(security.as_str()));
        if let Some(key) = passkey {
            payload.insert("psk", json!(key));
        }

        self.push(network_id, crate::resolver::DEFAULT_DEVICE_INDEX, &payload)
            .await?;
        self.state.security = security.as_str().to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use super::*;
    use crate::model::{Device, Network, Organization};

    /// Listing-free fake: verification and translation tests never
    /// reach the network unless a device name forces a listing call.
    struct NullApi;

    #[async_trait]
    impl ManagementApi for NullApi {
        async fn list_organizations(&self) -> Result<Vec<Organization>, CoreError> {
            Ok(vec![])
        }

        async fn list_networks(&self, _organization_id: &str) -> Result<Vec<Network>, CoreError> {
            Ok(vec![])
        }

        async fn list_devices(&self, _network_id: &str) -> Result<Vec<Device>, CoreError> {
            Ok(vec![])
        }

        async fn update_ssid(
            &self,
            _network_id: &str,
            _device_index: usize,
            _payload: &NativeUpdatePayload,
        ) -> Result<(), CoreError> {
            panic!("verification must not push updates");
        }
    }

    fn handler() -> MerakiMr45 {
        MerakiMr45::new(Arc::new(NullApi))
    }

    fn section(value: serde_json::Value) -> DeviceSection {
        DeviceSection::from_value(DEVICE_CLASS, &value).expect("mapping section")
    }

    #[test]
    fn translation_table_matches_native_schema() {
        let section = section(json!({
            "SSID": "Guest",
            "security": "wpa2",
            "key": "abc123",
            "bitrate": 12,
            "enabled": true,
            "networkID": "N_1",
        }));

        let payload = handler().unpack_data(&section).expect("translates");

        assert_eq!(payload.get("name"), Some(&json!("Guest")));
        assert_eq!(payload.get("wpaEncryptionMode"), Some(&json!("wpa2")));
        assert_eq!(payload.get("psk"), Some(&json!("abc123")));
        assert_eq!(payload.get("minBitrate"), Some(&json!(12.0)));
        assert_eq!(payload.get("enabled"), Some(&json!(true)));
        // Addressing fields never leak into the update body.
        assert_eq!(payload.get("networkID"), None);
        assert_eq!(payload.len(), 5);
    }

    #[test]
    fn unknown_fields_are_dropped_not_rejected() {
        let section = section(json!({
            "SSID": "Guest",
            "networkID": "N_1",
            "captivePortalTheme": "midnight",
        }));

        let payload = handler().unpack_data(&section).expect("translates");
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("name"), Some(&json!("Guest")));
    }

    #[test]
    fn translation_is_idempotent() {
        let section = section(json!({
            "SSID": "Guest",
            "security": "wpa2",
            "key": "abc123",
            "bitrate": "5.5",
            "networkID": "N_1",
        }));

        let handler = handler();
        let first = handler.unpack_data(&section).expect("translates");
        let second = handler.unpack_data(&section).expect("translates");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("serializes"),
            serde_json::to_string(&second).expect("serializes"),
        );
    }

    #[test]
    fn malformed_bitrate_is_a_translation_error() {
        let bad_values = [json!("fast"), json!(7), json!([12])];
        for bad in bad_values {
            let section = section(json!({ "bitrate": bad, "networkID": "N_1" }));
            let err = handler().unpack_data(&section).expect_err("must fail");
            assert!(
                matches!(err, CoreError::TranslationError { ref field, .. } if field == "bitrate"),
                "value {bad} should be a bitrate translation error"
            );
        }
    }

    #[tokio::test]
    async fn verify_requires_a_resolvable_target() {
        let section = section(json!({ "SSID": "Guest" }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(!verdict.is_passed());
    }

    #[tokio::test]
    async fn verify_rejects_psk_security_without_key() {
        let section = section(json!({
            "SSID": "Guest",
            "security": "wpa2",
            "networkID": "N_1",
        }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(matches!(verdict, Verification::Failed { ref reason } if reason.contains("key")));
    }

    #[tokio::test]
    async fn verify_rejects_unknown_security_mode() {
        let section = section(json!({
            "security": "rot13",
            "key": "abc",
            "networkID": "N_1",
        }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(matches!(verdict, Verification::Failed { .. }));
    }

    #[tokio::test]
    async fn verify_rejects_unsupported_pmf_field() {
        let section = section(json!({
            "SSID": "Guest",
            "pmf": "required",
            "networkID": "N_1",
        }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(matches!(verdict, Verification::Failed { ref reason } if reason.contains("pmf")));
    }

    #[tokio::test]
    async fn verify_accepts_open_security_without_key() {
        let section = section(json!({
            "SSID": "Guest",
            "security": "open",
            "networkID": "N_1",
        }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(verdict.is_passed());
    }

    #[tokio::test]
    async fn verify_fails_on_missing_named_device() {
        let section = section(json!({
            "SSID": "Guest",
            "networkID": "N_1",
            "device": "Lobby AP",
        }));
        let verdict = handler().verify_config(&section).await.expect("verifies");
        assert!(
            matches!(verdict, Verification::Failed { ref reason } if reason.contains("Lobby AP"))
        );
    }

    #[test]
    fn sections_build_from_index_maps() {
        let mut fields = IndexMap::new();
        fields.insert("SSID".to_owned(), json!("Guest"));
        let section = DeviceSection::from_fields(fields);
        assert_eq!(section.str_field("SSID"), Some("Guest"));
    }
}
