//! `meraki_networks_wireless_ssids`: the SSIDs of a wireless network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::computed_string_set;
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::WirelessSsid;
use crate::client::{ops, DashboardApi};
use crate::convert::to_set;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /networks/{networkId}/wireless/ssids`.
pub struct NetworksWirelessSsids;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    network_id: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    items: Vec<SsidState>,
}

#[derive(Debug, Serialize)]
struct SsidState {
    auth_mode: Option<String>,
    availability_tags: Vec<String>,
    available_on_all_aps: Option<bool>,
    band_selection: Option<String>,
    enabled: Option<bool>,
    encryption_mode: Option<String>,
    ip_assignment_mode: Option<String>,
    min_bitrate: Option<f64>,
    name: Option<String>,
    number: Option<i64>,
    per_client_bandwidth_limit_down: Option<i64>,
    per_client_bandwidth_limit_up: Option<i64>,
    splash_page: Option<String>,
    ssid_admin_accessible: Option<bool>,
    visible: Option<bool>,
    wpa_encryption_mode: Option<String>,
}

impl From<WirelessSsid> for SsidState {
    fn from(ssid: WirelessSsid) -> Self {
        Self {
            auth_mode: ssid.auth_mode,
            availability_tags: to_set(ssid.availability_tags),
            available_on_all_aps: ssid.available_on_all_aps,
            band_selection: ssid.band_selection,
            enabled: ssid.enabled,
            encryption_mode: ssid.encryption_mode,
            ip_assignment_mode: ssid.ip_assignment_mode,
            min_bitrate: ssid.min_bitrate,
            name: ssid.name,
            number: ssid.number,
            per_client_bandwidth_limit_down: ssid.per_client_bandwidth_limit_down,
            per_client_bandwidth_limit_up: ssid.per_client_bandwidth_limit_up,
            splash_page: ssid.splash_page,
            ssid_admin_accessible: ssid.ssid_admin_accessible,
            visible: ssid.visible,
            wpa_encryption_mode: ssid.wpa_encryption_mode,
        }
    }
}

#[async_trait]
impl DataSource for NetworksWirelessSsids {
    fn type_name(&self) -> &'static str {
        "networks_wireless_ssids"
    }

    fn schema(&self) -> Schema {
        let ssid = Block::new()
            .with_description("Array of ResponseWirelessGetNetworkWirelessSsids")
            .with_attribute("auth_mode", Attribute::computed_string().with_description("The association control method for the SSID"))
            .with_attribute("availability_tags", computed_string_set("List of tags for this SSID. If availableOnAllAps is false, then the SSID is only broadcast by APs with tags matching any of the tags in this list"))
            .with_attribute("available_on_all_aps", Attribute::computed_bool().with_description("Whether all APs broadcast the SSID or if it's restricted to APs matching any availability tags"))
            .with_attribute("band_selection", Attribute::computed_string().with_description("The client-serving radio frequencies of this SSID in the default indoor RF profile"))
            .with_attribute("enabled", Attribute::computed_bool().with_description("Whether or not the SSID is enabled"))
            .with_attribute("encryption_mode", Attribute::computed_string().with_description("The psk encryption mode for the SSID"))
            .with_attribute("ip_assignment_mode", Attribute::computed_string().with_description("The client IP assignment mode"))
            .with_attribute("min_bitrate", Attribute::computed_float64().with_description("The minimum bitrate in Mbps of this SSID in the default indoor RF profile"))
            .with_attribute("name", Attribute::computed_string().with_description("The name of the SSID"))
            .with_attribute("number", Attribute::computed_int64().with_description("Unique identifier of the SSID"))
            .with_attribute("per_client_bandwidth_limit_down", Attribute::computed_int64().with_description("The download bandwidth limit in Kbps. (0 represents no limit.)"))
            .with_attribute("per_client_bandwidth_limit_up", Attribute::computed_int64().with_description("The upload bandwidth limit in Kbps. (0 represents no limit.)"))
            .with_attribute("splash_page", Attribute::computed_string().with_description("The type of splash page for the SSID"))
            .with_attribute("ssid_admin_accessible", Attribute::computed_bool().with_description("SSID Administrator access status"))
            .with_attribute("visible", Attribute::computed_bool().with_description("Whether the SSID is advertised or hidden by the AP"))
            .with_attribute("wpa_encryption_mode", Attribute::computed_string().with_description("The types of WPA encryption"));

        Schema::v0()
            .with_description("List the MR SSIDs in a network")
            .with_attribute("network_id", Attribute::path_param("networkId path parameter. Network ID"))
            .with_block("items", NestedBlock::list(ssid))
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_NETWORK_WIRELESS_SSIDS, network_id = %config.network_id, "Calling Dashboard API");
        let ssids = require_data(
            ops::GET_NETWORK_WIRELESS_SSIDS,
            client.get_network_wireless_ssids(&config.network_id).await,
        )?;
        encode(&State {
            config,
            items: ssids.into_iter().map(SsidState::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardApi;
    use crate::testing::assert_state_matches_schema;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_ssids() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_NETWORK_WIRELESS_SSIDS,
            json!([
                {
                    "number": 0,
                    "name": "My SSID",
                    "enabled": true,
                    "authMode": "8021x-radius",
                    "minBitrate": 11,
                    "perClientBandwidthLimitUp": 0,
                    "availableOnAllAps": false,
                    "availabilityTags": ["tag2", "tag1", "tag2"]
                },
                {"number": 1, "enabled": false}
            ]),
        );

        let state = NetworksWirelessSsids.read(&mock, json!({"network_id": "N_1"})).await.unwrap();

        let items = state["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["availability_tags"], json!(["tag1", "tag2"]));
        assert_eq!(items[0]["per_client_bandwidth_limit_up"], 0);
        assert!(items[0]["per_client_bandwidth_limit_down"].is_null());
        assert_eq!(items[1]["availability_tags"], json!([]));
        assert_state_matches_schema(&NetworksWirelessSsids.schema(), &state);
    }
}
