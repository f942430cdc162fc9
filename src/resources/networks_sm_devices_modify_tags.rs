//! `meraki_networks_sm_devices_modify_tags`: add, remove or replace tags on
//! Systems Manager devices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, optional_string_list, parameters, path_param, Selection};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{SmDeviceTags, SmDevicesModifyTagsRequest};
use crate::client::{ops, DashboardApi};
use crate::convert::{non_empty, non_empty_list};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Runs `POST /networks/{networkId}/sm/devices/modifyTags`.
pub struct NetworksSmDevicesModifyTags;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    network_id: String,
    #[serde(default)]
    parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Parameters {
    #[serde(flatten)]
    selection: Selection,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    update_action: Option<String>,
}

impl From<&Parameters> for SmDevicesModifyTagsRequest {
    fn from(p: &Parameters) -> Self {
        Self {
            selection: p.selection.to_request(),
            tags: non_empty_list(p.tags.clone()),
            update_action: non_empty(p.update_action.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    items: Vec<TaggedState>,
}

#[derive(Debug, Serialize)]
struct TaggedState {
    id: Option<String>,
    serial_number: Option<String>,
    tags: Option<Vec<String>>,
    wifi_mac: Option<String>,
}

impl From<SmDeviceTags> for TaggedState {
    fn from(device: SmDeviceTags) -> Self {
        Self {
            id: device.id,
            serial_number: device.serial_number,
            tags: device.tags,
            wifi_mac: device.wifi_mac,
        }
    }
}

#[async_trait]
impl ActionResource for NetworksSmDevicesModifyTags {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices_modify_tags"
    }

    fn schema(&self) -> Schema {
        let parameters_block = Selection::attributes(Block::new(), "modified")
            .with_attribute("tags", optional_string_list("The tags to be added, removed, or updated."))
            .with_attribute(
                "update_action",
                Attribute::optional_string().with_description("One of add, delete, or update. Only devices that have been modified will be returned."),
            );

        Schema::v0()
            .with_description("Add, delete, or update the tags of a set of devices")
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_block("parameters", parameters(parameters_block))
            .with_block(
                "items",
                NestedBlock::list(
                    Block::new()
                        .with_description("Array of ResponseSmModifyNetworkSmDevicesTags")
                        .with_attribute("id", Attribute::computed_string().with_description("The Meraki Id of the device record."))
                        .with_attribute("serial_number", Attribute::computed_string().with_description("The device serial number."))
                        .with_attribute("tags", computed_string_list("An array of tags associated with the device."))
                        .with_attribute("wifi_mac", Attribute::computed_string().with_description("The MAC of the device.")),
                ),
            )
    }

    fn read_behavior(&self) -> ReadBehavior {
        ReadBehavior::Warn
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request = plan
            .parameters
            .as_ref()
            .map(SmDevicesModifyTagsRequest::from)
            .unwrap_or_default();

        debug!(operation = ops::MODIFY_NETWORK_SM_DEVICES_TAGS, network_id = %plan.network_id, "Calling Dashboard API");
        let devices = require_data(
            ops::MODIFY_NETWORK_SM_DEVICES_TAGS,
            client.modify_network_sm_devices_tags(&plan.network_id, &request).await,
        )?;
        encode(&State {
            plan,
            items: devices.into_iter().map(TaggedState::from).collect(),
        })
    }
}
