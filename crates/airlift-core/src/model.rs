// ── Domain model ──
//
// Minimal management-plane entities the resolver works with. The
// transport crate's response types are bridged into these in `convert`,
// so the pipeline never touches raw API models.

use serde::{Deserialize, Serialize};

/// An organization reachable under the configured credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A network within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// A device claimed into a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub serial: String,
    pub name: Option<String>,
}
