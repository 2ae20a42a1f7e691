// airlift-api: Async Rust client for the wireless dashboard management API

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod networks;
pub mod organizations;
pub mod ssids;
pub mod transport;

pub use client::DashboardClient;
pub use error::Error;
pub use models::{Device, Network, Organization, Ssid};
pub use transport::{TlsMode, TransportConfig};
