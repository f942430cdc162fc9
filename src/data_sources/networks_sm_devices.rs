//! `meraki_networks_sm_devices`: Systems Manager devices enrolled in a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, filter_list, optional_string_list, Paging};
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::{SmDevice, SmDevicesQuery};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /networks/{networkId}/sm/devices`.
pub struct NetworksSmDevices;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    network_id: String,
    #[serde(default)]
    fields: Option<Vec<String>>,
    #[serde(default)]
    wifi_macs: Option<Vec<String>>,
    #[serde(default)]
    serials: Option<Vec<String>>,
    #[serde(default)]
    ids: Option<Vec<String>>,
    #[serde(default)]
    uuids: Option<Vec<String>>,
    #[serde(default)]
    system_types: Option<Vec<String>>,
    #[serde(default)]
    scope: Option<Vec<String>>,
    #[serde(flatten)]
    paging: Paging,
}

impl Config {
    fn query(&self) -> SmDevicesQuery {
        SmDevicesQuery {
            fields: filter_list(&self.fields),
            wifi_macs: filter_list(&self.wifi_macs),
            serials: filter_list(&self.serials),
            ids: filter_list(&self.ids),
            uuids: filter_list(&self.uuids),
            system_types: filter_list(&self.system_types),
            scope: filter_list(&self.scope),
            page: self.paging.to_query(),
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    items: Vec<SmDeviceState>,
}

#[derive(Debug, Serialize)]
struct SmDeviceState {
    id: Option<String>,
    ip: Option<String>,
    name: Option<String>,
    os_name: Option<String>,
    serial_number: Option<String>,
    ssid: Option<String>,
    system_model: Option<String>,
    tags: Vec<String>,
    uuid: Option<String>,
    wifi_mac: Option<String>,
}

impl From<SmDevice> for SmDeviceState {
    fn from(device: SmDevice) -> Self {
        Self {
            id: device.id,
            ip: device.ip,
            name: device.name,
            os_name: device.os_name,
            serial_number: device.serial_number,
            ssid: device.ssid,
            system_model: device.system_model,
            tags: device.tags.unwrap_or_default(),
            uuid: device.uuid,
            wifi_mac: device.wifi_mac,
        }
    }
}

#[async_trait]
impl DataSource for NetworksSmDevices {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices"
    }

    fn schema(&self) -> Schema {
        let schema = Schema::v0()
            .with_description("List the devices enrolled in an SM network with various specified fields and filters")
            .with_attribute("network_id", Attribute::path_param("networkId path parameter. Network ID"))
            .with_attribute(
                "fields",
                optional_string_list(
                    "fields query parameter. Additional fields that will be displayed for each device. The default fields are: id, name, tags, ssid, wifiMac, osName, systemModel, uuid, and serialNumber.",
                ),
            )
            .with_attribute("wifi_macs", optional_string_list("wifiMacs query parameter. Filter devices by wifi mac(s)."))
            .with_attribute("serials", optional_string_list("serials query parameter. Filter devices by serial(s)."))
            .with_attribute("ids", optional_string_list("ids query parameter. Filter devices by id(s)."))
            .with_attribute("uuids", optional_string_list("uuids query parameter. Filter devices by uuid(s)."))
            .with_attribute(
                "system_types",
                optional_string_list("systemTypes query parameter. Filter devices by system type(s)."),
            )
            .with_attribute(
                "scope",
                optional_string_list(
                    "scope query parameter. Specify a scope (one of all, none, withAny, withAll, withoutAny, or withoutAll) and a set of tags.",
                ),
            );

        Paging::attributes(schema, 1000).with_block(
            "items",
            NestedBlock::list(
                Block::new()
                    .with_description("Array of ResponseSmGetNetworkSmDevices")
                    .with_attribute("id", Attribute::computed_string().with_description("The Meraki Id of the device record."))
                    .with_attribute("ip", Attribute::computed_string().with_description("The IP address of the device."))
                    .with_attribute("name", Attribute::computed_string().with_description("The name of the device."))
                    .with_attribute("os_name", Attribute::computed_string().with_description("The name of the device OS."))
                    .with_attribute("serial_number", Attribute::computed_string().with_description("The device serial number."))
                    .with_attribute("ssid", Attribute::computed_string().with_description("The name of the SSID the device was last connected to."))
                    .with_attribute("system_model", Attribute::computed_string().with_description("The device model."))
                    .with_attribute("tags", computed_string_list("An array of tags associated with the device."))
                    .with_attribute("uuid", Attribute::computed_string().with_description("The UUID of the device."))
                    .with_attribute("wifi_mac", Attribute::computed_string().with_description("The MAC of the device.")),
            ),
        )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_NETWORK_SM_DEVICES, network_id = %config.network_id, "Calling Dashboard API");
        let devices = require_data(
            ops::GET_NETWORK_SM_DEVICES,
            client
                .get_network_sm_devices(&config.network_id, &config.query())
                .await,
        )?;
        encode(&State {
            config,
            items: devices.into_iter().map(SmDeviceState::from).collect(),
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
    async fn test_read_devices_with_filters() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_NETWORK_SM_DEVICES,
            json!([{
                "id": "1284392014819",
                "name": "Miles's phone",
                "tags": ["tag1"],
                "wifiMac": "00:11:22:33:44:55",
                "osName": "iOS 16.1",
                "serialNumber": "F5XKHEBX",
                "ip": "1.2.3.4"
            }]),
        );

        let state = NetworksSmDevices
            .read(
                &mock,
                json!({
                    "network_id": "N_1",
                    "serials": ["F5XKHEBX"],
                    "per_page": 10,
                    "starting_after": ""
                }),
            )
            .await
            .unwrap();

        let device = &state["items"][0];
        assert_eq!(device["wifi_mac"], "00:11:22:33:44:55");
        assert_eq!(device["os_name"], "iOS 16.1");
        assert!(device["uuid"].is_null());
        assert_eq!(state["serials"], json!(["F5XKHEBX"]));
        assert!(state["fields"].is_null());

        let call = mock.last_call(ops::GET_NETWORK_SM_DEVICES).unwrap();
        assert_eq!(call.params, vec!["N_1"]);
        assert_eq!(
            call.payload,
            Some(json!([["serials[]", "F5XKHEBX"], ["perPage", "10"]]))
        );
        assert_state_matches_schema(&NetworksSmDevices.schema(), &state);
    }

    #[tokio::test]
    async fn test_untagged_device_has_empty_tags() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_NETWORK_SM_DEVICES, json!([{"id": "1"}]));
        let state = NetworksSmDevices.read(&mock, json!({"network_id": "N_1"})).await.unwrap();
        assert_eq!(state["items"][0]["tags"], json!([]));
        assert!(mock.last_call(ops::GET_NETWORK_SM_DEVICES).unwrap().payload.is_none());
    }
}
