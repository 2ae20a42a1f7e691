// Organization endpoints
//
// Organization listing is key-scoped: the dashboard returns every
// organization the configured API key can administer.

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::Organization;

impl DashboardClient {
    /// List all organizations reachable under the configured API key.
    ///
    /// `GET /organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        let url = self.api_url("organizations")?;
        debug!("listing organizations");
        self.get(url).await
    }
}
