// Device endpoints

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::Device;

impl DashboardClient {
    /// List all devices claimed into a network.
    ///
    /// `GET /networks/{network_id}/devices`
    pub async fn list_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        let url = self.api_url(&format!("networks/{network_id}/devices"))?;
        debug!(network_id, "listing devices");
        self.get(url).await
    }
}
