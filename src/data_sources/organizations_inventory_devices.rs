//! `meraki_organizations_inventory_devices`: devices in an organization's
//! inventory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, filter_list, optional_string_list, NameValueState, Paging};
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::{InventoryDevice, InventoryDevicesQuery};
use crate::client::{ops, DashboardApi};
use crate::convert::{list_or_empty, non_empty};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /organizations/{organizationId}/inventory/devices`.
pub struct OrganizationsInventoryDevices;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    organization_id: String,
    #[serde(flatten)]
    paging: Paging,
    #[serde(default)]
    used_state: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    macs: Option<Vec<String>>,
    #[serde(default)]
    network_ids: Option<Vec<String>>,
    #[serde(default)]
    serials: Option<Vec<String>>,
    #[serde(default)]
    models: Option<Vec<String>>,
    #[serde(default)]
    order_numbers: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    tags_filter_type: Option<String>,
    #[serde(default)]
    product_types: Option<Vec<String>>,
}

impl Config {
    fn query(&self) -> InventoryDevicesQuery {
        InventoryDevicesQuery {
            page: self.paging.to_query(),
            used_state: non_empty(self.used_state.clone()),
            search: non_empty(self.search.clone()),
            macs: filter_list(&self.macs),
            network_ids: filter_list(&self.network_ids),
            serials: filter_list(&self.serials),
            models: filter_list(&self.models),
            order_numbers: filter_list(&self.order_numbers),
            tags: filter_list(&self.tags),
            tags_filter_type: non_empty(self.tags_filter_type.clone()),
            product_types: filter_list(&self.product_types),
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    items: Vec<InventoryDeviceState>,
}

#[derive(Debug, Serialize)]
struct InventoryDeviceState {
    claimed_at: Option<String>,
    country_code: Option<String>,
    details: Vec<NameValueState>,
    license_expiration_date: Option<String>,
    mac: Option<String>,
    model: Option<String>,
    name: Option<String>,
    network_id: Option<String>,
    order_number: Option<String>,
    product_type: Option<String>,
    serial: Option<String>,
    tags: Vec<String>,
}

impl From<InventoryDevice> for InventoryDeviceState {
    fn from(device: InventoryDevice) -> Self {
        Self {
            claimed_at: device.claimed_at,
            country_code: device.country_code,
            details: list_or_empty(device.details),
            license_expiration_date: device.license_expiration_date,
            mac: device.mac,
            model: device.model,
            name: device.name,
            network_id: device.network_id,
            order_number: device.order_number,
            product_type: device.product_type,
            serial: device.serial,
            tags: device.tags.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl DataSource for OrganizationsInventoryDevices {
    fn type_name(&self) -> &'static str {
        "organizations_inventory_devices"
    }

    fn schema(&self) -> Schema {
        let schema = Schema::v0()
            .with_description("Return the device inventory for an organization")
            .with_attribute(
                "organization_id",
                Attribute::path_param("organizationId path parameter. Organization ID"),
            );

        Paging::attributes(schema, 1000)
            .with_attribute(
                "used_state",
                Attribute::optional_string().with_description("usedState query parameter. Filter results by used or unused inventory. Accepted values are 'used' or 'unused'."),
            )
            .with_attribute(
                "search",
                Attribute::optional_string().with_description("search query parameter. Search for devices in inventory based on serial number, mac address, or model."),
            )
            .with_attribute("macs", optional_string_list("macs query parameter. Search for devices in inventory based on mac addresses."))
            .with_attribute("network_ids", optional_string_list("networkIds query parameter. Search for devices in inventory based on network ids. Use explicit 'null' value to get available devices only."))
            .with_attribute("serials", optional_string_list("serials query parameter. Search for devices in inventory based on serials."))
            .with_attribute("models", optional_string_list("models query parameter. Search for devices in inventory based on model."))
            .with_attribute("order_numbers", optional_string_list("orderNumbers query parameter. Search for devices in inventory based on order numbers."))
            .with_attribute("tags", optional_string_list("tags query parameter. Filter devices by tags. The filtering is case-sensitive. If tags are included, 'tagsFilterType' should also be included (see below)."))
            .with_attribute(
                "tags_filter_type",
                Attribute::optional_string().with_description("tagsFilterType query parameter. To use with 'tags' parameter, to filter devices which contain ANY or ALL given tags. Accepted values are 'withAnyTags' or 'withAllTags', default is 'withAnyTags'."),
            )
            .with_attribute("product_types", optional_string_list("productTypes query parameter. Filter devices by product type. Accepted values are appliance, camera, cellularGateway, sensor, switch, systemsManager, and wireless."))
            .with_block(
                "items",
                NestedBlock::list(
                    Block::new()
                        .with_description("Array of ResponseOrganizationsGetOrganizationInventoryDevices")
                        .with_attribute("claimed_at", Attribute::computed_string().with_description("Claimed time of the device"))
                        .with_attribute("country_code", Attribute::computed_string().with_description("Country/region code from device, network, or store order"))
                        .with_block("details", NameValueState::block("Additional device information"))
                        .with_attribute("license_expiration_date", Attribute::computed_string().with_description("License expiration date of the device"))
                        .with_attribute("mac", Attribute::computed_string().with_description("MAC address of the device"))
                        .with_attribute("model", Attribute::computed_string().with_description("Model type of the device"))
                        .with_attribute("name", Attribute::computed_string().with_description("Name of the device"))
                        .with_attribute("network_id", Attribute::computed_string().with_description("Network Id of the device"))
                        .with_attribute("order_number", Attribute::computed_string().with_description("Order number of the device"))
                        .with_attribute("product_type", Attribute::computed_string().with_description("Product type of the device"))
                        .with_attribute("serial", Attribute::computed_string().with_description("Serial number of the device"))
                        .with_attribute("tags", computed_string_list("Device tags")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(
            operation = ops::GET_ORGANIZATION_INVENTORY_DEVICES,
            organization_id = %config.organization_id,
            "Calling Dashboard API"
        );
        let devices = require_data(
            ops::GET_ORGANIZATION_INVENTORY_DEVICES,
            client
                .get_organization_inventory_devices(&config.organization_id, &config.query())
                .await,
        )?;
        encode(&State {
            config,
            items: devices.into_iter().map(InventoryDeviceState::from).collect(),
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
    async fn test_read_inventory() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_ORGANIZATION_INVENTORY_DEVICES,
            json!([{
                "mac": "00:11:22:33:44:55",
                "serial": "Q234-ABCD-5678",
                "model": "MR34",
                "networkId": "N_24329156",
                "orderNumber": "S1234567",
                "claimedAt": "2018-02-11T00:00:00.090210Z",
                "productType": "wireless",
                "countryCode": "US",
                "tags": ["tag1", "tag2"],
                "details": [{"name": "Catalyst serial", "value": "123ABC"}]
            }]),
        );

        let state = OrganizationsInventoryDevices
            .read(
                &mock,
                json!({
                    "organization_id": "2930418",
                    "used_state": "used",
                    "search": "",
                    "product_types": ["wireless"]
                }),
            )
            .await
            .unwrap();

        let device = &state["items"][0];
        assert_eq!(device["order_number"], "S1234567");
        assert_eq!(device["details"][0]["value"], "123ABC");
        assert!(device["license_expiration_date"].is_null());
        assert_eq!(state["used_state"], "used");

        let call = mock.last_call(ops::GET_ORGANIZATION_INVENTORY_DEVICES).unwrap();
        assert_eq!(
            call.payload,
            Some(json!([["usedState", "used"], ["productTypes[]", "wireless"]]))
        );
        assert_state_matches_schema(&OrganizationsInventoryDevices.schema(), &state);
    }

    #[tokio::test]
    async fn test_failure_yields_one_diagnostic() {
        let mock = MockDashboardApi::new().with_status(
            ops::GET_ORGANIZATION_INVENTORY_DEVICES,
            429,
            "Too many requests",
        );
        let err = OrganizationsInventoryDevices
            .read(&mock, json!({"organization_id": "2930418"}))
            .await
            .unwrap_err();
        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].summary,
            "Failure when executing GetOrganizationInventoryDevices"
        );
    }
}
