//! `meraki_networks_sm_devices_move`: move Systems Manager devices to another
//! network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{computed_string_list, item, parameters, path_param, Selection};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{SmDevicesMoveRequest, SmDevicesMoved};
use crate::client::{ops, DashboardApi};
use crate::convert::non_empty;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /networks/{networkId}/sm/devices/move`.
pub struct NetworksSmDevicesMove;

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
    new_network: Option<String>,
}

impl From<&Parameters> for SmDevicesMoveRequest {
    fn from(p: &Parameters) -> Self {
        Self {
            selection: p.selection.to_request(),
            new_network: non_empty(p.new_network.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: MovedState,
}

#[derive(Debug, Serialize)]
struct MovedState {
    ids: Vec<String>,
    new_network: Option<String>,
}

impl From<SmDevicesMoved> for MovedState {
    fn from(moved: SmDevicesMoved) -> Self {
        Self {
            ids: moved.ids.unwrap_or_default(),
            new_network: moved.new_network,
        }
    }
}

#[async_trait]
impl ActionResource for NetworksSmDevicesMove {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices_move"
    }

    fn schema(&self) -> Schema {
        let parameters_block = Selection::attributes(Block::new(), "moved").with_attribute(
            "new_network",
            Attribute::optional_string().with_description("The new network to which the devices will be moved."),
        );

        Schema::v0()
            .with_description("Move a set of devices to a new network")
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_block("parameters", parameters(parameters_block))
            .with_block(
                "item",
                item(
                    Block::new()
                        .with_attribute("ids", computed_string_list("The Meraki Ids of the set of devices."))
                        .with_attribute("new_network", Attribute::computed_string().with_description("The network to which the devices was moved.")),
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
            .map(SmDevicesMoveRequest::from)
            .unwrap_or_default();

        debug!(operation = ops::MOVE_NETWORK_SM_DEVICES, network_id = %plan.network_id, "Calling Dashboard API");
        let moved = require_data(
            ops::MOVE_NETWORK_SM_DEVICES,
            client.move_network_sm_devices(&plan.network_id, &request).await,
        )?;
        info!(
            network_id = %plan.network_id,
            new_network = ?moved.new_network,
            "Systems Manager devices moved"
        );
        encode(&State {
            plan,
            item: moved.into(),
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
    async fn test_move() {
        let mock = MockDashboardApi::new().with_response(
            ops::MOVE_NETWORK_SM_DEVICES,
            json!({"ids": ["1284392014819"], "newNetwork": "N_2"}),
        );

        let state = NetworksSmDevicesMove
            .create(
                &mock,
                json!({
                    "network_id": "N_1",
                    "parameters": {"wifi_macs": ["00:11:22:33:44:55"], "new_network": "N_2"}
                }),
            )
            .await
            .unwrap();

        assert_eq!(state["item"]["new_network"], "N_2");
        assert_eq!(
            mock.last_call(ops::MOVE_NETWORK_SM_DEVICES).unwrap().payload,
            Some(json!({"wifiMacs": ["00:11:22:33:44:55"], "newNetwork": "N_2"}))
        );
        assert_state_matches_schema(&NetworksSmDevicesMove.schema(), &state);
    }

    #[tokio::test]
    async fn test_empty_target_is_not_sent() {
        let mock = MockDashboardApi::new().with_response(ops::MOVE_NETWORK_SM_DEVICES, json!({}));
        NetworksSmDevicesMove
            .create(&mock, json!({"network_id": "N_1", "parameters": {"new_network": ""}}))
            .await
            .unwrap();
        assert_eq!(
            mock.last_call(ops::MOVE_NETWORK_SM_DEVICES).unwrap().payload,
            Some(json!({}))
        );
    }
}
