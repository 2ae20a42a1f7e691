// ── Device resolver ──
//
// Maps human-readable organization/network/device names to the
// management API's internal identifiers. Resolution is exact-name and
// case-sensitive; every failure is a hard per-section failure -- the
// pipeline never falls back to a partially resolved target.

use async_trait::async_trait;

use tracing::debug;

use crate::document::DeviceSection;
use crate::error::CoreError;
use crate::model::{Device, Network, Organization};
use crate::payload::NativeUpdatePayload;

/// Device index used when a section names no device. The management
/// API's update call addresses slot 0, which is the first device on
/// single-device networks -- multi-device networks should name the
/// device explicitly.
pub const DEFAULT_DEVICE_INDEX: usize = 0;

// ── Management API seam ──────────────────────────────────────────────

/// The management-plane surface the pipeline depends on.
///
/// `airlift_api::DashboardClient` implements this (see `convert`);
/// tests substitute in-memory fakes. All listing calls are read-only;
/// `update_ssid` is the single mutating operation and must not be
/// retried by callers.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn list_organizations(&self) -> Result<Vec<Organization>, CoreError>;

    async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>, CoreError>;

    async fn list_devices(&self, network_id: &str) -> Result<Vec<Device>, CoreError>;

    async fn update_ssid(
        &self,
        network_id: &str,
        device_index: usize,
        payload: &NativeUpdatePayload,
    ) -> Result<(), CoreError>;
}

// ── Resolution inputs and outputs ────────────────────────────────────

/// How a section selects the device within its target network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// A caller-supplied device index.
    Index(usize),
    /// Exact-name match against the network's device list.
    Name(String),
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self::Index(DEFAULT_DEVICE_INDEX)
    }
}

/// What a section asks the resolver to locate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Explicit network identifier; when set, name resolution is skipped.
    pub network_id: Option<String>,
    /// Organization name (optional if unambiguous).
    pub organization: Option<String>,
    /// Network name (optional if unambiguous).
    pub network: Option<String>,
    /// Device selection within the network.
    pub device: DeviceSelector,
}

impl ResolveRequest {
    /// Derive a request from a section's resolution-relevant fields.
    pub fn from_section(section: &DeviceSection) -> Self {
        Self {
            network_id: section.network_id().map(str::to_owned),
            organization: section.organization().map(str::to_owned),
            network: section.network().map(str::to_owned),
            device: section
                .device()
                .map_or_else(DeviceSelector::default, |name| {
                    DeviceSelector::Name(name.to_owned())
                }),
        }
    }
}

/// A fully resolved apply target. Transient: rebuilt for every section,
/// never cached across sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    /// `None` when an explicit `networkID` short-circuited resolution.
    pub organization_id: Option<String>,
    pub network_id: String,
    pub device_index: usize,
}

// ── Resolver ─────────────────────────────────────────────────────────

/// Resolves the organization → network → device hierarchy against live
/// listings from the management API.
pub struct DeviceResolver<'a> {
    api: &'a dyn ManagementApi,
}

impl<'a> DeviceResolver<'a> {
    pub fn new(api: &'a dyn ManagementApi) -> Self {
        Self { api }
    }

    /// Resolve a request to a concrete apply target.
    ///
    /// An explicit `network_id` bypasses organization and network name
    /// matching entirely -- the update call is scoped by network id
    /// alone. Otherwise: a single reachable organization is selected
    /// automatically; with several, the request must name one exactly.
    /// Network resolution repeats the same rule within the selected
    /// organization.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<AccountContext, CoreError> {
        if let Some(ref network_id) = request.network_id {
            debug!(network_id, "using explicit network id");
            let device_index = self.resolve_device(network_id, &request.device).await?;
            return Ok(AccountContext {
                organization_id: None,
                network_id: network_id.clone(),
                device_index,
            });
        }

        let organization = self.resolve_organization(request.organization.as_deref()).await?;
        let network = self
            .resolve_network(&organization.id, request.network.as_deref())
            .await?;
        let device_index = self.resolve_device(&network.id, &request.device).await?;

        debug!(
            organization_id = organization.id,
            network_id = network.id,
            device_index,
            "resolved apply target"
        );

        Ok(AccountContext {
            organization_id: Some(organization.id),
            network_id: network.id,
            device_index,
        })
    }

    async fn resolve_organization(&self, name: Option<&str>) -> Result<Organization, CoreError> {
        let mut organizations = self.api.list_organizations().await?;

        match (organizations.len(), name) {
            (0, _) => Err(CoreError::NoOrganizations),
            // A single reachable organization is selected automatically.
            (1, _) => Ok(organizations.remove(0)),
            (count, None) => Err(CoreError::AmbiguousOrganization { count }),
            (_, Some(wanted)) => organizations
                .into_iter()
                .find(|org| org.name == wanted)
                .ok_or_else(|| CoreError::OrganizationNotFound {
                    name: wanted.to_owned(),
                }),
        }
    }

    async fn resolve_network(
        &self,
        organization_id: &str,
        name: Option<&str>,
    ) -> Result<Network, CoreError> {
        let mut networks = self.api.list_networks(organization_id).await?;

        match (networks.len(), name) {
            (0, _) => Err(CoreError::NoNetworks {
                organization_id: organization_id.to_owned(),
            }),
            (1, _) => Ok(networks.remove(0)),
            (count, None) => Err(CoreError::AmbiguousNetwork {
                organization_id: organization_id.to_owned(),
                count,
            }),
            (_, Some(wanted)) => networks
                .into_iter()
                .find(|net| net.name == wanted)
                .ok_or_else(|| CoreError::NetworkNotFound {
                    name: wanted.to_owned(),
                }),
        }
    }

    /// Resolve the device within a network.
    ///
    /// An index selector passes through without a listing call -- the
    /// update addresses the slot directly. A name selector matches
    /// exactly against the network's device list.
    async fn resolve_device(
        &self,
        network_id: &str,
        selector: &DeviceSelector,
    ) -> Result<usize, CoreError> {
        match selector {
            DeviceSelector::Index(index) => Ok(*index),
            DeviceSelector::Name(wanted) => {
                let devices = self.api.list_devices(network_id).await?;
                devices
                    .iter()
                    .position(|device| device.name.as_deref() == Some(wanted.as_str()))
                    .ok_or_else(|| CoreError::DeviceNotFound {
                        name: wanted.clone(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeApi {
        organizations: Vec<Organization>,
        networks: Vec<Network>,
        devices: Vec<Device>,
    }

    #[async_trait]
    impl ManagementApi for FakeApi {
        async fn list_organizations(&self) -> Result<Vec<Organization>, CoreError> {
            Ok(self.organizations.clone())
        }

        async fn list_networks(&self, _organization_id: &str) -> Result<Vec<Network>, CoreError> {
            Ok(self.networks.clone())
        }

        async fn list_devices(&self, _network_id: &str) -> Result<Vec<Device>, CoreError> {
            Ok(self.devices.clone())
        }

        async fn update_ssid(
            &self,
            _network_id: &str,
            _device_index: usize,
            _payload: &NativeUpdatePayload,
        ) -> Result<(), CoreError> {
            panic!("resolver must never call update_ssid");
        }
    }

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: id.into(),
            name: name.into(),
        }
    }

    fn net(id: &str, name: &str) -> Network {
        Network {
            id: id.into(),
            name: name.into(),
        }
    }

    fn dev(serial: &str, name: Option<&str>) -> Device {
        Device {
            serial: serial.into(),
            name: name.map(Into::into),
        }
    }

    fn two_org_api() -> FakeApi {
        FakeApi {
            organizations: vec![org("O_1", "Acme"), org("O_2", "Globex")],
            networks: vec![net("N_1", "Branch"), net("N_2", "HQ")],
            devices: vec![dev("S_1", Some("Lobby AP")), dev("S_2", Some("Roof AP"))],
        }
    }

    #[tokio::test]
    async fn explicit_network_id_short_circuits_resolution() {
        let api = FakeApi {
            organizations: vec![],
            networks: vec![],
            devices: vec![],
        };
        let request = ResolveRequest {
            network_id: Some("N_9".into()),
            ..ResolveRequest::default()
        };

        let ctx = DeviceResolver::new(&api).resolve(&request).await.expect("resolves");
        assert_eq!(ctx.network_id, "N_9");
        assert_eq!(ctx.organization_id, None);
        assert_eq!(ctx.device_index, DEFAULT_DEVICE_INDEX);
    }

    #[tokio::test]
    async fn single_organization_and_network_auto_select() {
        let api = FakeApi {
            organizations: vec![org("O_1", "Acme")],
            networks: vec![net("N_1", "Branch")],
            devices: vec![],
        };

        let ctx = DeviceResolver::new(&api)
            .resolve(&ResolveRequest::default())
            .await
            .expect("resolves");
        assert_eq!(ctx.organization_id.as_deref(), Some("O_1"));
        assert_eq!(ctx.network_id, "N_1");
    }

    #[tokio::test]
    async fn multiple_organizations_require_a_name() {
        let api = two_org_api();
        let err = DeviceResolver::new(&api)
            .resolve(&ResolveRequest::default())
            .await
            .expect_err("ambiguous");
        assert!(matches!(err, CoreError::AmbiguousOrganization { count: 2 }));
    }

    #[tokio::test]
    async fn organization_match_is_exact_and_case_sensitive() {
        let api = two_org_api();
        let request = ResolveRequest {
            organization: Some("acme".into()),
            network: Some("Branch".into()),
            ..ResolveRequest::default()
        };

        let err = DeviceResolver::new(&api)
            .resolve(&request)
            .await
            .expect_err("case mismatch");
        assert!(matches!(err, CoreError::OrganizationNotFound { ref name } if name == "acme"));
    }

    #[tokio::test]
    async fn multiple_networks_require_a_name() {
        let api = two_org_api();
        let request = ResolveRequest {
            organization: Some("Acme".into()),
            ..ResolveRequest::default()
        };

        let err = DeviceResolver::new(&api)
            .resolve(&request)
            .await
            .expect_err("ambiguous");
        assert!(matches!(
            err,
            CoreError::AmbiguousNetwork { ref organization_id, count: 2 } if organization_id == "O_1"
        ));
    }

    #[tokio::test]
    async fn zero_networks_is_fatal() {
        let api = FakeApi {
            organizations: vec![org("O_1", "Acme")],
            networks: vec![],
            devices: vec![],
        };

        let err = DeviceResolver::new(&api)
            .resolve(&ResolveRequest::default())
            .await
            .expect_err("no networks");
        assert!(matches!(err, CoreError::NoNetworks { ref organization_id } if organization_id == "O_1"));
    }

    #[tokio::test]
    async fn device_resolution_by_name() {
        let api = two_org_api();
        let request = ResolveRequest {
            organization: Some("Acme".into()),
            network: Some("HQ".into()),
            device: DeviceSelector::Name("Roof AP".into()),
            ..ResolveRequest::default()
        };

        let ctx = DeviceResolver::new(&api).resolve(&request).await.expect("resolves");
        assert_eq!(ctx.network_id, "N_2");
        assert_eq!(ctx.device_index, 1);
    }

    #[tokio::test]
    async fn missing_device_name_is_fatal() {
        let api = two_org_api();
        let request = ResolveRequest {
            network_id: Some("N_1".into()),
            device: DeviceSelector::Name("Basement AP".into()),
            ..ResolveRequest::default()
        };

        let err = DeviceResolver::new(&api).resolve(&request).await.expect_err("no device");
        assert!(matches!(err, CoreError::DeviceNotFound { ref name } if name == "Basement AP"));
    }

    #[tokio::test]
    async fn resolution_is_deterministic() {
        let api = two_org_api();
        let request = ResolveRequest {
            organization: Some("Globex".into()),
            network: Some("Branch".into()),
            ..ResolveRequest::default()
        };

        let first = DeviceResolver::new(&api).resolve(&request).await.expect("resolves");
        let second = DeviceResolver::new(&api).resolve(&request).await.expect("resolves");
        assert_eq!(first, second);
    }
}
