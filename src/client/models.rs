//! Dashboard API models
//!
//! Response and request bodies for the endpoints the provider exposes.
//! Field names follow the Dashboard API's camelCase JSON. Every response
//! field is optional: the API omits keys freely, and the adapters must tell
//! "absent" apart from a zero value.

use serde::{Deserialize, Serialize};

use super::query::{Query, ToQuery};

// ---------------------------------------------------------------------------
// Shared fragments
// ---------------------------------------------------------------------------

/// `{ "enabled": bool }`, which the API nests in many places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledFlag {
    pub enabled: Option<bool>,
}

/// A `{ "name": ..., "value": ... }` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameValue {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Cursor pagination accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    pub per_page: Option<i64>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
}

impl ToQuery for PageQuery {
    fn to_query(&self) -> Query {
        Query::new()
            .opt("perPage", self.per_page.as_ref())
            .opt("startingAfter", self.starting_after.as_ref())
            .opt("endingBefore", self.ending_before.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Administered identities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub last_used_dashboard_at: Option<String>,
    pub authentication: Option<IdentityAuthentication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAuthentication {
    pub mode: Option<String>,
    pub api: Option<IdentityAuthenticationApi>,
    pub saml: Option<EnabledFlag>,
    pub two_factor: Option<EnabledFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAuthenticationApi {
    pub key: Option<IdentityApiKeyStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityApiKeyStatus {
    pub created: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub created_at: Option<String>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedApiKey {
    pub key: Option<String>,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub address: Option<String>,
    pub details: Option<Vec<NameValue>>,
    pub firmware: Option<String>,
    pub imei: Option<String>,
    pub lan_ip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub mac: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub network_id: Option<String>,
    pub notes: Option<String>,
    pub product_type: Option<String>,
    pub serial: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliancePerformance {
    pub perf_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliancePerformanceQuery {
    pub t0: Option<String>,
    pub t1: Option<String>,
    pub timespan: Option<f64>,
}

impl ToQuery for AppliancePerformanceQuery {
    fn to_query(&self) -> Query {
        Query::new()
            .opt("t0", self.t0.as_ref())
            .opt("t1", self.t1.as_ref())
            .opt("timespan", self.timespan.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSense {
    pub audio_detection: Option<EnabledFlag>,
    pub mqtt_broker_id: Option<String>,
    pub mqtt_topics: Option<Vec<String>>,
    pub sense_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPort {
    pub port_id: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub poe_enabled: Option<bool>,
    #[serde(rename = "type")]
    pub port_type: Option<String>,
    pub vlan: Option<i64>,
    pub voice_vlan: Option<i64>,
    pub allowed_vlans: Option<String>,
    pub isolation_enabled: Option<bool>,
    pub rstp_enabled: Option<bool>,
    pub stp_guard: Option<String>,
    pub link_negotiation: Option<String>,
    pub access_policy_type: Option<String>,
    pub sticky_mac_allow_list_limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessStatus {
    pub basic_service_sets: Option<Vec<BasicServiceSet>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicServiceSet {
    pub ssid_name: Option<String>,
    pub ssid_number: Option<i64>,
    pub enabled: Option<bool>,
    pub band: Option<String>,
    pub bssid: Option<String>,
    pub channel: Option<i64>,
    pub channel_width: Option<String>,
    pub power: Option<String>,
    pub visible: Option<bool>,
    pub broadcasting: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkLedsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkLeds {
    pub duration: Option<i64>,
    pub period: Option<i64>,
    pub duty: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebootResult {
    pub success: Option<bool>,
}

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: Option<String>,
    pub organization_id: Option<String>,
    pub name: Option<String>,
    pub product_types: Option<Vec<String>>,
    pub time_zone: Option<String>,
    pub tags: Option<Vec<String>>,
    pub enrollment_string: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub is_bound_to_config_template: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevice {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ssid: Option<String>,
    pub wifi_mac: Option<String>,
    pub os_name: Option<String>,
    pub system_model: Option<String>,
    pub uuid: Option<String>,
    pub serial_number: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmDevicesQuery {
    pub fields: Vec<String>,
    pub wifi_macs: Vec<String>,
    pub serials: Vec<String>,
    pub ids: Vec<String>,
    pub uuids: Vec<String>,
    pub system_types: Vec<String>,
    pub scope: Vec<String>,
    pub page: PageQuery,
}

impl ToQuery for SmDevicesQuery {
    fn to_query(&self) -> Query {
        let mut query = Query::new()
            .array("fields", &self.fields)
            .array("wifiMacs", &self.wifi_macs)
            .array("serials", &self.serials)
            .array("ids", &self.ids)
            .array("uuids", &self.uuids)
            .array("systemTypes", &self.system_types)
            .array("scope", &self.scope);
        for (name, value) in self.page.to_query().pairs() {
            query = query.opt(name, Some(value));
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessSsid {
    pub number: Option<i64>,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub splash_page: Option<String>,
    pub ssid_admin_accessible: Option<bool>,
    pub auth_mode: Option<String>,
    pub encryption_mode: Option<String>,
    pub wpa_encryption_mode: Option<String>,
    pub ip_assignment_mode: Option<String>,
    pub band_selection: Option<String>,
    pub min_bitrate: Option<f64>,
    pub per_client_bandwidth_limit_up: Option<i64>,
    pub per_client_bandwidth_limit_down: Option<i64>,
    pub visible: Option<bool>,
    pub available_on_all_aps: Option<bool>,
    pub availability_tags: Option<Vec<String>>,
}

/// Device selection shared by the Systems Manager bulk actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_macs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serials: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesCheckinRequest {
    #[serde(flatten)]
    pub selection: SmDevicesSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesLockRequest {
    #[serde(flatten)]
    pub selection: SmDevicesSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesMoveRequest {
    #[serde(flatten)]
    pub selection: SmDevicesSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesModifyTagsRequest {
    #[serde(flatten)]
    pub selection: SmDevicesSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDeviceWipeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<i64>,
}

/// Response of checkin and lock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDeviceIds {
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDevicesMoved {
    pub ids: Option<Vec<String>>,
    pub new_network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDeviceWiped {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmDeviceTags {
    pub id: Option<String>,
    pub wifi_mac: Option<String>,
    pub serial_number: Option<String>,
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub api: Option<EnabledFlag>,
    pub licensing: Option<OrganizationLicensing>,
    pub cloud: Option<OrganizationCloud>,
    pub management: Option<OrganizationManagement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationLicensing {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCloud {
    pub region: Option<OrganizationCloudRegion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCloudRegion {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationManagement {
    pub details: Option<Vec<NameValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDevice {
    pub mac: Option<String>,
    pub serial: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub network_id: Option<String>,
    pub order_number: Option<String>,
    pub claimed_at: Option<String>,
    pub license_expiration_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub product_type: Option<String>,
    pub country_code: Option<String>,
    pub details: Option<Vec<NameValue>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryDevicesQuery {
    pub page: PageQuery,
    pub used_state: Option<String>,
    pub search: Option<String>,
    pub macs: Vec<String>,
    pub network_ids: Vec<String>,
    pub serials: Vec<String>,
    pub models: Vec<String>,
    pub order_numbers: Vec<String>,
    pub tags: Vec<String>,
    pub tags_filter_type: Option<String>,
    pub product_types: Vec<String>,
}

impl ToQuery for InventoryDevicesQuery {
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        for (name, value) in self.page.to_query().pairs() {
            query = query.opt(name, Some(value));
        }
        query
            .opt("usedState", self.used_state.as_ref())
            .opt("search", self.search.as_ref())
            .array("macs", &self.macs)
            .array("networkIds", &self.network_ids)
            .array("serials", &self.serials)
            .array("models", &self.models)
            .array("orderNumbers", &self.order_numbers)
            .array("tags", &self.tags)
            .opt("tagsFilterType", self.tags_filter_type.as_ref())
            .array("productTypes", &self.product_types)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIntrusion {
    pub allowed_rules: Option<Vec<IntrusionRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrusionRule {
    pub rule_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReleaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serials: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRelease {
    pub serials: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRfRecalculateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRfRecalculation {
    pub estimated_completed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_decodes_camel_case_and_missing_keys() {
        let device: Device = serde_json::from_value(json!({
            "serial": "Q2XX-XXXX",
            "lanIp": "10.0.0.2",
            "networkId": "N_1",
            "lat": 37.4,
            "tags": ["recently-added"]
        }))
        .unwrap();

        assert_eq!(device.serial.as_deref(), Some("Q2XX-XXXX"));
        assert_eq!(device.lan_ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(device.lat, Some(37.4));
        assert_eq!(device.lng, None);
        assert_eq!(device.details, None);
    }

    #[test]
    fn test_switch_port_type_field() {
        let port: SwitchPort =
            serde_json::from_value(json!({"portId": "1", "type": "access", "vlan": 10})).unwrap();
        assert_eq!(port.port_type.as_deref(), Some("access"));
        assert_eq!(port.vlan, Some(10));
    }

    #[test]
    fn test_selection_flattens_and_skips_unset() {
        let request = SmDevicesLockRequest {
            selection: SmDevicesSelection {
                serials: Some(vec!["Q2YY-1111".to_string()]),
                ..Default::default()
            },
            pin: Some(123456),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"serials": ["Q2YY-1111"], "pin": 123456})
        );
    }

    #[test]
    fn test_wipe_request_omits_unset_fields() {
        let request = SmDeviceWipeRequest {
            serial: Some("Q2YY-1111".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"serial": "Q2YY-1111"}));
    }

    #[test]
    fn test_inventory_query_encoding() {
        let query = InventoryDevicesQuery {
            page: PageQuery {
                per_page: Some(100),
                ..Default::default()
            },
            used_state: Some("used".to_string()),
            serials: vec!["Q2AA".to_string()],
            ..Default::default()
        }
        .to_query();

        assert_eq!(
            query.pairs(),
            &[
                ("perPage".to_string(), "100".to_string()),
                ("usedState".to_string(), "used".to_string()),
                ("serials[]".to_string(), "Q2AA".to_string()),
            ]
        );
    }

    #[test]
    fn test_appliance_performance_query() {
        let query = AppliancePerformanceQuery {
            timespan: Some(3600.0),
            ..Default::default()
        }
        .to_query();
        assert_eq!(query.pairs(), &[("timespan".to_string(), "3600".to_string())]);
    }
}
