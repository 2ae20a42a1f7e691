// ── Configuration document model ──
//
// The decoded form of an operator's configuration file: an ordered
// mapping from device-class key to a per-class section. Decoding itself
// happens outside the pipeline (the CLI feeds YAML through serde); this
// module only defines the shape the pipeline consumes.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;

/// The reserved top-level key for non-device directives. Both the
/// verification gate and the apply orchestrator skip it.
pub const RESERVED_DIRECTIVE_KEY: &str = "steps";

/// Well-known vendor-neutral field names for device sections.
///
/// Handlers translate these into their native update schema; fields not
/// listed here may still appear in documents and are dropped during
/// translation to keep older tools compatible with newer documents.
pub mod fields {
    /// Broadcast name of the wireless network.
    pub const SSID: &str = "SSID";
    /// Encryption mode, e.g. `wpa2`.
    pub const SECURITY: &str = "security";
    /// Passkey for the selected security mode.
    pub const KEY: &str = "key";
    /// Minimum bitrate, Mbps.
    pub const BITRATE: &str = "bitrate";
    /// Explicit network identifier -- short-circuits name resolution.
    pub const NETWORK_ID: &str = "networkID";
    /// Organization name, for name-based resolution.
    pub const ORGANIZATION: &str = "organization";
    /// Network name, for name-based resolution.
    pub const NETWORK: &str = "network";
    /// Device name, for name-based device selection.
    pub const DEVICE: &str = "device";
    /// Whether the SSID is enabled.
    pub const ENABLED: &str = "enabled";
    /// Whether the SSID is advertised.
    pub const VISIBLE: &str = "visible";
    /// Protected management frames mode.
    pub const PMF: &str = "pmf";
}

// ── ConfigDocument ───────────────────────────────────────────────────

/// An ordered mapping from device-class key to section value.
///
/// Order matters: sections are verified and applied strictly in
/// document order. The document is read-only after decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    sections: IndexMap<String, Value>,
}

impl ConfigDocument {
    /// Build a document from pre-decoded sections (used by tests and
    /// programmatic callers).
    pub fn from_sections(sections: IndexMap<String, Value>) -> Self {
        Self { sections }
    }

    /// Iterate all top-level entries in document order, reserved key included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate device-class entries in document order, skipping the
    /// reserved directive key.
    pub fn device_sections(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(k, _)| *k != RESERVED_DIRECTIVE_KEY)
    }

    /// Look up a section value by device-class key.
    pub fn get(&self, class: &str) -> Option<&Value> {
        self.sections.get(class)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ── DeviceSection ────────────────────────────────────────────────────

/// The per-device-class portion of a document: vendor-neutral field
/// names mapped to values.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSection {
    fields: IndexMap<String, Value>,
}

impl DeviceSection {
    /// Interpret a raw section value as a field mapping.
    ///
    /// A section that is not a mapping (a bare string, a list) cannot
    /// carry device configuration and fails validation for that class.
    pub fn from_value(class: &str, value: &Value) -> Result<Self, CoreError> {
        let Some(object) = value.as_object() else {
            return Err(CoreError::ValidationFailed {
                class: class.to_owned(),
                reason: "section is not a mapping of configuration fields".to_owned(),
            });
        };

        Ok(Self {
            fields: object.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        })
    }

    /// Build a section directly from fields (tests, programmatic callers).
    pub fn from_fields(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Fetch a field as a string slice, `None` if absent or not a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // ── Resolution-relevant accessors ────────────────────────────────

    /// Explicit network identifier, if the document pinned one.
    pub fn network_id(&self) -> Option<&str> {
        self.str_field(fields::NETWORK_ID)
    }

    /// Organization name for name-based resolution.
    pub fn organization(&self) -> Option<&str> {
        self.str_field(fields::ORGANIZATION)
    }

    /// Network name for name-based resolution.
    pub fn network(&self) -> Option<&str> {
        self.str_field(fields::NETWORK)
    }

    /// Device name for name-based device selection.
    pub fn device(&self) -> Option<&str> {
        self.str_field(fields::DEVICE)
    }

    /// Returns `true` if the section carries enough information for the
    /// resolver to locate a target network.
    pub fn has_resolvable_target(&self) -> bool {
        self.network_id().is_some() || self.network().is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(yaml: &str) -> ConfigDocument {
        serde_yaml::from_str(yaml).expect("valid yaml")
    }

    #[test]
    fn document_preserves_order_and_skips_reserved_key() {
        let doc = doc(
            "steps:\n  - one\ncisco:\n  SSID: Guest\naruba:\n  SSID: Lab\n",
        );

        let all: Vec<_> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(all, vec!["steps", "cisco", "aruba"]);

        let classes: Vec<_> = doc.device_sections().map(|(k, _)| k).collect();
        assert_eq!(classes, vec!["cisco", "aruba"]);
    }

    #[test]
    fn section_from_non_mapping_is_validation_failure() {
        let err = DeviceSection::from_value("cisco", &json!("just a string"))
            .expect_err("non-mapping must fail");
        assert!(matches!(err, CoreError::ValidationFailed { ref class, .. } if class == "cisco"));
    }

    #[test]
    fn section_accessors() {
        let section = DeviceSection::from_value(
            "cisco",
            &json!({
                "SSID": "Guest",
                "networkID": "N_1",
                "bitrate": 12,
            }),
        )
        .expect("mapping section");

        assert_eq!(section.str_field(fields::SSID), Some("Guest"));
        assert_eq!(section.network_id(), Some("N_1"));
        assert!(section.has_resolvable_target());
        // Non-string values are not surfaced through str_field.
        assert_eq!(section.str_field(fields::BITRATE), None);
        assert_eq!(section.get(fields::BITRATE), Some(&json!(12)));
    }

    #[test]
    fn target_requires_network_id_or_name() {
        let section =
            DeviceSection::from_value("cisco", &json!({ "SSID": "Guest" })).expect("mapping");
        assert!(!section.has_resolvable_target());

        let named = DeviceSection::from_value("cisco", &json!({ "network": "Branch" }))
            .expect("mapping");
        assert!(named.has_resolvable_target());
    }
}
