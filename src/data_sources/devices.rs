//! `meraki_devices`: one device by serial.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, NameValueState};
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::Device;
use crate::client::{ops, DashboardApi};
use crate::convert::list_or_empty;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /devices/{serial}`.
pub struct Devices;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    serial: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: DeviceState,
}

#[derive(Debug, Serialize)]
struct DeviceState {
    address: Option<String>,
    details: Vec<NameValueState>,
    firmware: Option<String>,
    imei: Option<String>,
    lan_ip: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    mac: Option<String>,
    model: Option<String>,
    name: Option<String>,
    network_id: Option<String>,
    notes: Option<String>,
    product_type: Option<String>,
    serial: Option<String>,
    tags: Option<Vec<String>>,
}

impl From<Device> for DeviceState {
    fn from(device: Device) -> Self {
        Self {
            address: device.address,
            details: list_or_empty(device.details),
            firmware: device.firmware,
            imei: device.imei,
            lan_ip: device.lan_ip,
            lat: device.lat,
            lng: device.lng,
            mac: device.mac,
            model: device.model,
            name: device.name,
            network_id: device.network_id,
            notes: device.notes,
            product_type: device.product_type,
            serial: device.serial,
            tags: device.tags,
        }
    }
}

#[async_trait]
impl DataSource for Devices {
    fn type_name(&self) -> &'static str {
        "devices"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Return a single device")
            .with_attribute("serial", Attribute::path_param("serial path parameter."))
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new()
                        .with_attribute("address", Attribute::computed_string().with_description("Physical address of the device"))
                        .with_block("details", NameValueState::block("Additional device information"))
                        .with_attribute("firmware", Attribute::computed_string().with_description("Firmware version of the device"))
                        .with_attribute("imei", Attribute::computed_string().with_description("IMEI of the device, if applicable"))
                        .with_attribute("lan_ip", Attribute::computed_string().with_description("LAN IP address of the device"))
                        .with_attribute("lat", Attribute::computed_float64().with_description("Latitude of the device"))
                        .with_attribute("lng", Attribute::computed_float64().with_description("Longitude of the device"))
                        .with_attribute("mac", Attribute::computed_string().with_description("MAC address of the device"))
                        .with_attribute("model", Attribute::computed_string().with_description("Model of the device"))
                        .with_attribute("name", Attribute::computed_string().with_description("Name of the device"))
                        .with_attribute("network_id", Attribute::computed_string().with_description("ID of the network the device belongs to"))
                        .with_attribute("notes", Attribute::computed_string().with_description("Notes for the device, limited to 255 characters"))
                        .with_attribute("product_type", Attribute::computed_string().with_description("Product type of the device"))
                        .with_attribute("serial", Attribute::computed_string().with_description("Serial number of the device"))
                        .with_attribute("tags", computed_string_list("List of tags assigned to the device")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_DEVICE, serial = %config.serial, "Calling Dashboard API");
        let device = require_data(ops::GET_DEVICE, client.get_device(&config.serial).await)?;
        encode(&State {
            config,
            item: device.into(),
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
    async fn test_read_device() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_DEVICE,
            json!({
                "serial": "Q2XX-XXXX",
                "name": "My AP",
                "lat": 37.4180951010362,
                "lanIp": "1.2.3.4",
                "tags": ["recently-added"],
                "details": [{"name": "Catalyst serial", "value": "123ABC"}],
                "notes": ""
            }),
        );

        let state = Devices.read(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap();

        assert_eq!(state["serial"], "Q2XX-XXXX");
        assert_eq!(state["item"]["name"], "My AP");
        assert_eq!(state["item"]["lan_ip"], "1.2.3.4");
        assert_eq!(state["item"]["details"][0]["value"], "123ABC");
        assert_eq!(state["item"]["notes"], "");
        assert_eq!(state["item"]["lng"], Value::Null);
        assert_eq!(mock.last_call(ops::GET_DEVICE).unwrap().params, vec!["Q2XX-XXXX"]);
        assert_state_matches_schema(&Devices.schema(), &state);
    }

    #[tokio::test]
    async fn test_missing_collections() {
        let mock = MockDashboardApi::new().with_response(ops::GET_DEVICE, json!({}));
        let state = Devices.read(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap();

        assert_eq!(state["item"]["details"], json!([]));
        assert_eq!(state["item"]["tags"], Value::Null);
        assert_state_matches_schema(&Devices.schema(), &state);
    }

    #[tokio::test]
    async fn test_not_found() {
        let mock = MockDashboardApi::new().with_status(ops::GET_DEVICE, 404, "Device not found");
        let err = Devices.read(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap_err();

        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Failure when executing GetDevice");
    }
}
