// Dashboard API response types
//
// Models for the wireless dashboard's JSON API. Fields use
// `#[serde(default)]` liberally because the dashboard omits optional
// fields rather than sending nulls.

use serde::{Deserialize, Serialize};

// ── Error body ───────────────────────────────────────────────────────

/// Error body returned on 4xx/5xx responses:
/// ```json
/// { "errors": ["Network not found"] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

// ── Organization ─────────────────────────────────────────────────────

/// Organization reachable under the configured API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

// ── Network ──────────────────────────────────────────────────────────

/// Network within an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device claimed into a network. The serial is the only field the
/// dashboard guarantees; everything else depends on device state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
    #[serde(default)]
    pub firmware: Option<String>,
}

// ── SSID ─────────────────────────────────────────────────────────────

/// SSID state echoed back by the dashboard after an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ssid {
    pub number: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub auth_mode: Option<String>,
    #[serde(default)]
    pub wpa_encryption_mode: Option<String>,
    #[serde(default)]
    pub psk: Option<String>,
    #[serde(default)]
    pub min_bitrate: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
}
