//! `meraki_devices_wireless_status`: SSID broadcast status of an access point.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::{BasicServiceSet, WirelessStatus};
use crate::client::{ops, DashboardApi};
use crate::convert::list_or_empty;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /devices/{serial}/wireless/status`.
pub struct DevicesWirelessStatus;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    serial: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: StatusState,
}

#[derive(Debug, Serialize)]
struct StatusState {
    basic_service_sets: Vec<BssState>,
}

#[derive(Debug, Serialize)]
struct BssState {
    band: Option<String>,
    broadcasting: Option<bool>,
    bssid: Option<String>,
    channel: Option<i64>,
    channel_width: Option<String>,
    enabled: Option<bool>,
    power: Option<String>,
    ssid_name: Option<String>,
    ssid_number: Option<i64>,
    visible: Option<bool>,
}

impl From<BasicServiceSet> for BssState {
    fn from(bss: BasicServiceSet) -> Self {
        Self {
            band: bss.band,
            broadcasting: bss.broadcasting,
            bssid: bss.bssid,
            channel: bss.channel,
            channel_width: bss.channel_width,
            enabled: bss.enabled,
            power: bss.power,
            ssid_name: bss.ssid_name,
            ssid_number: bss.ssid_number,
            visible: bss.visible,
        }
    }
}

impl From<WirelessStatus> for StatusState {
    fn from(status: WirelessStatus) -> Self {
        Self {
            basic_service_sets: list_or_empty(status.basic_service_sets),
        }
    }
}

#[async_trait]
impl DataSource for DevicesWirelessStatus {
    fn type_name(&self) -> &'static str {
        "devices_wireless_status"
    }

    fn schema(&self) -> Schema {
        let bss = Block::new()
            .with_description("SSID status list")
            .with_attribute("band", Attribute::computed_string().with_description("Frequency range used for wireless communication."))
            .with_attribute("broadcasting", Attribute::computed_bool().with_description("Status of SSID broadcasting."))
            .with_attribute("bssid", Attribute::computed_string().with_description("Unique identifier of wireless access point."))
            .with_attribute("channel", Attribute::computed_int64().with_description("Frequency channel used for wireless communication."))
            .with_attribute("channel_width", Attribute::computed_string().with_description("Width of frequency channel used for wireless communication."))
            .with_attribute("enabled", Attribute::computed_bool().with_description("Status of wireless network."))
            .with_attribute("power", Attribute::computed_string().with_description("Strength of wireless signal."))
            .with_attribute("ssid_name", Attribute::computed_string().with_description("Name of wireless network."))
            .with_attribute("ssid_number", Attribute::computed_int64().with_description("Unique identifier of wireless network."))
            .with_attribute("visible", Attribute::computed_bool().with_description("Visibility of wireless network."));

        Schema::v0()
            .with_description("Return the SSID statuses of an access point")
            .with_attribute("serial", Attribute::path_param("serial path parameter."))
            .with_block(
                "item",
                NestedBlock::single(Block::new().with_block("basic_service_sets", NestedBlock::list(bss))),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_DEVICE_WIRELESS_STATUS, serial = %config.serial, "Calling Dashboard API");
        let status = require_data(
            ops::GET_DEVICE_WIRELESS_STATUS,
            client.get_device_wireless_status(&config.serial).await,
        )?;
        encode(&State {
            config,
            item: status.into(),
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
    async fn test_read_status() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_DEVICE_WIRELESS_STATUS,
            json!({
                "basicServiceSets": [{
                    "ssidName": "My SSID",
                    "ssidNumber": 0,
                    "enabled": true,
                    "band": "2.4 GHz",
                    "bssid": "8A:15:04:00:00:00",
                    "channel": 11,
                    "channelWidth": "20 MHz",
                    "power": "18 dBm",
                    "visible": true,
                    "broadcasting": true
                }]
            }),
        );

        let state = DevicesWirelessStatus.read(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap();

        let bss = &state["item"]["basic_service_sets"][0];
        assert_eq!(bss["ssid_number"], 0);
        assert_eq!(bss["channel_width"], "20 MHz");
        assert_state_matches_schema(&DevicesWirelessStatus.schema(), &state);
    }

    #[tokio::test]
    async fn test_no_service_sets() {
        let mock = MockDashboardApi::new().with_response(ops::GET_DEVICE_WIRELESS_STATUS, json!({}));
        let state = DevicesWirelessStatus.read(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap();
        assert_eq!(state["item"]["basic_service_sets"], json!([]));
    }
}
