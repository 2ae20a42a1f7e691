// Network endpoints

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::Network;

impl DashboardClient {
    /// List all networks in an organization.
    ///
    /// `GET /organizations/{org_id}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        let url = self.api_url(&format!("organizations/{org_id}/networks"))?;
        debug!(org_id, "listing networks");
        self.get(url).await
    }
}
