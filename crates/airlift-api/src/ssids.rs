// SSID endpoints
//
// The update call is the single mutating operation this client exposes.
// It carries the vendor-native payload verbatim -- field translation
// happens upstream, in the handler that built the payload.

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::Ssid;

impl DashboardClient {
    /// Update an SSID slot on a network.
    ///
    /// `PUT /networks/{network_id}/ssids/{number}`
    ///
    /// `payload` is the native update document (e.g. `name`, `psk`,
    /// `wpaEncryptionMode`). The dashboard echoes the resulting SSID
    /// state. This call is not idempotent on the dashboard side -- do
    /// not retry it blindly.
    pub async fn update_ssid(
        &self,
        network_id: &str,
        number: usize,
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Ssid, Error> {
        let url = self.api_url(&format!("networks/{network_id}/ssids/{number}"))?;
        debug!(network_id, number, "updating ssid");
        self.put(url, payload).await
    }
}
