// ── API-to-domain bridging ──
//
// Bridges `airlift_api` response types into the core domain model and
// plugs `DashboardClient` into the pipeline's `ManagementApi` seam.
// The pipeline itself never sees raw API types.

use async_trait::async_trait;

use airlift_api::DashboardClient;

use crate::error::CoreError;
use crate::model::{Device, Network, Organization};
use crate::payload::NativeUpdatePayload;
use crate::resolver::ManagementApi;

impl From<airlift_api::Organization> for Organization {
    fn from(org: airlift_api::Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
        }
    }
}

impl From<airlift_api::Network> for Network {
    fn from(network: airlift_api::Network) -> Self {
        Self {
            id: network.id,
            name: network.name,
        }
    }
}

impl From<airlift_api::Device> for Device {
    fn from(device: airlift_api::Device) -> Self {
        Self {
            serial: device.serial,
            name: device.name,
        }
    }
}

#[async_trait]
impl ManagementApi for DashboardClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>, CoreError> {
        let organizations = DashboardClient::list_organizations(self).await?;
        Ok(organizations.into_iter().map(Into::into).collect())
    }

    async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>, CoreError> {
        let networks = DashboardClient::list_networks(self, organization_id).await?;
        Ok(networks.into_iter().map(Into::into).collect())
    }

    async fn list_devices(&self, network_id: &str) -> Result<Vec<Device>, CoreError> {
        let devices = DashboardClient::list_devices(self, network_id).await?;
        Ok(devices.into_iter().map(Into::into).collect())
    }

    async fn update_ssid(
        &self,
        network_id: &str,
        device_index: usize,
        payload: &NativeUpdatePayload,
    ) -> Result<(), CoreError> {
        DashboardClient::update_ssid(self, network_id, device_index, payload.as_map()).await?;
        Ok(())
    }
}
