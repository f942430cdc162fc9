//! The Dashboard API surface used by the adapters.
//!
//! [`DashboardApi`] abstracts the HTTP client so adapters can be driven by
//! [`MerakiClient`](super::MerakiClient) in production and by
//! [`MockDashboardApi`](super::MockDashboardApi) in tests.

use async_trait::async_trait;

use super::error::ClientError;
use super::models::*;

/// Dashboard operation ids, as named in the Dashboard API reference.
///
/// Used in failure diagnostics and as keys for canned mock responses.
#[allow(missing_docs)]
pub mod ops {
    pub const GET_ADMINISTERED_IDENTITIES_ME: &str = "GetAdministeredIdentitiesMe";
    pub const GET_ADMINISTERED_IDENTITIES_ME_API_KEYS: &str = "GetAdministeredIdentitiesMeApiKeys";
    pub const GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS: &str =
        "GenerateAdministeredIdentitiesMeApiKeys";
    pub const REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS: &str =
        "RevokeAdministeredIdentitiesMeApiKeys";

    pub const GET_DEVICE: &str = "GetDevice";
    pub const GET_DEVICE_APPLIANCE_PERFORMANCE: &str = "GetDeviceAppliancePerformance";
    pub const GET_DEVICE_CAMERA_SENSE: &str = "GetDeviceCameraSense";
    pub const GET_DEVICE_SWITCH_PORTS: &str = "GetDeviceSwitchPorts";
    pub const GET_DEVICE_WIRELESS_STATUS: &str = "GetDeviceWirelessStatus";
    pub const BLINK_DEVICE_LEDS: &str = "BlinkDeviceLeds";
    pub const REBOOT_DEVICE: &str = "RebootDevice";

    pub const GET_NETWORK: &str = "GetNetwork";
    pub const GET_NETWORK_SM_DEVICES: &str = "GetNetworkSmDevices";
    pub const GET_NETWORK_WIRELESS_SSIDS: &str = "GetNetworkWirelessSsids";
    pub const CHECKIN_NETWORK_SM_DEVICES: &str = "CheckinNetworkSmDevices";
    pub const LOCK_NETWORK_SM_DEVICES: &str = "LockNetworkSmDevices";
    pub const MODIFY_NETWORK_SM_DEVICES_TAGS: &str = "ModifyNetworkSmDevicesTags";
    pub const MOVE_NETWORK_SM_DEVICES: &str = "MoveNetworkSmDevices";
    pub const WIPE_NETWORK_SM_DEVICES: &str = "WipeNetworkSmDevices";
    pub const DELETE_NETWORK_SWITCH_QOS_RULE: &str = "DeleteNetworkSwitchQosRule";

    pub const GET_ORGANIZATIONS: &str = "GetOrganizations";
    pub const GET_ORGANIZATION: &str = "GetOrganization";
    pub const GET_ORGANIZATION_INVENTORY_DEVICES: &str = "GetOrganizationInventoryDevices";
    pub const GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION: &str =
        "GetOrganizationApplianceSecurityIntrusion";
    pub const RELEASE_FROM_ORGANIZATION_INVENTORY: &str = "ReleaseFromOrganizationInventory";
    pub const RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS: &str =
        "RecalculateOrganizationWirelessRadioAutoRfChannels";
}

/// A successful Dashboard response.
///
/// `data` is `None` when the API answered `204`, an empty body or a literal
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A response carrying a body.
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            data: Some(data),
        }
    }

    /// A bodiless response.
    pub fn empty(status: u16) -> Self {
        Self { status, data: None }
    }
}

/// One async method per Dashboard endpoint the provider exposes.
///
/// Implementations must be `Send + Sync`: the gRPC server dispatches
/// requests concurrently and every adapter shares the same client.
/// Methods are named after the operation ids in [`ops`].
#[allow(missing_docs)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    // Administered identities
    async fn get_administered_identities_me(&self) -> Result<ApiResponse<Identity>, ClientError>;
    async fn get_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<Vec<ApiKey>>, ClientError>;
    async fn generate_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<GeneratedApiKey>, ClientError>;
    async fn revoke_administered_identities_me_api_keys(
        &self,
        suffix: &str,
    ) -> Result<ApiResponse<()>, ClientError>;

    // Devices
    async fn get_device(&self, serial: &str) -> Result<ApiResponse<Device>, ClientError>;
    async fn get_device_appliance_performance(
        &self,
        serial: &str,
        query: &AppliancePerformanceQuery,
    ) -> Result<ApiResponse<AppliancePerformance>, ClientError>;
    async fn get_device_camera_sense(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<CameraSense>, ClientError>;
    async fn get_device_switch_ports(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<Vec<SwitchPort>>, ClientError>;
    async fn get_device_wireless_status(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<WirelessStatus>, ClientError>;
    async fn blink_device_leds(
        &self,
        serial: &str,
        request: &BlinkLedsRequest,
    ) -> Result<ApiResponse<BlinkLeds>, ClientError>;
    async fn reboot_device(&self, serial: &str) -> Result<ApiResponse<RebootResult>, ClientError>;

    // Networks
    async fn get_network(&self, network_id: &str) -> Result<ApiResponse<Network>, ClientError>;
    async fn get_network_sm_devices(
        &self,
        network_id: &str,
        query: &SmDevicesQuery,
    ) -> Result<ApiResponse<Vec<SmDevice>>, ClientError>;
    async fn get_network_wireless_ssids(
        &self,
        network_id: &str,
    ) -> Result<ApiResponse<Vec<WirelessSsid>>, ClientError>;
    async fn checkin_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesCheckinRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError>;
    async fn lock_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesLockRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError>;
    async fn modify_network_sm_devices_tags(
        &self,
        network_id: &str,
        request: &SmDevicesModifyTagsRequest,
    ) -> Result<ApiResponse<Vec<SmDeviceTags>>, ClientError>;
    async fn move_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesMoveRequest,
    ) -> Result<ApiResponse<SmDevicesMoved>, ClientError>;
    async fn wipe_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDeviceWipeRequest,
    ) -> Result<ApiResponse<SmDeviceWiped>, ClientError>;
    async fn delete_network_switch_qos_rule(
        &self,
        network_id: &str,
        qos_rule_id: &str,
    ) -> Result<ApiResponse<()>, ClientError>;

    // Organizations
    async fn get_organizations(
        &self,
        query: &PageQuery,
    ) -> Result<ApiResponse<Vec<Organization>>, ClientError>;
    async fn get_organization(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<Organization>, ClientError>;
    async fn get_organization_inventory_devices(
        &self,
        organization_id: &str,
        query: &InventoryDevicesQuery,
    ) -> Result<ApiResponse<Vec<InventoryDevice>>, ClientError>;
    async fn get_organization_appliance_security_intrusion(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<SecurityIntrusion>, ClientError>;
    async fn release_from_organization_inventory(
        &self,
        organization_id: &str,
        request: &InventoryReleaseRequest,
    ) -> Result<ApiResponse<InventoryRelease>, ClientError>;
    async fn recalculate_organization_wireless_radio_auto_rf_channels(
        &self,
        organization_id: &str,
        request: &AutoRfRecalculateRequest,
    ) -> Result<ApiResponse<AutoRfRecalculation>, ClientError>;
}
