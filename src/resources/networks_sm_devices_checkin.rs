//! `meraki_networks_sm_devices_checkin`: force Systems Manager devices to
//! check in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, item, parameters, path_param, Selection};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{SmDeviceIds, SmDevicesCheckinRequest};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Block, Schema};

/// Runs `POST /networks/{networkId}/sm/devices/checkin`.
pub struct NetworksSmDevicesCheckin;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    network_id: String,
    #[serde(default)]
    parameters: Option<Selection>,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: IdsState,
}

#[derive(Debug, Serialize)]
struct IdsState {
    ids: Vec<String>,
}

impl From<SmDeviceIds> for IdsState {
    fn from(devices: SmDeviceIds) -> Self {
        Self {
            ids: devices.ids.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ActionResource for NetworksSmDevicesCheckin {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices_checkin"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Force check-in a set of devices")
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_block("parameters", parameters(Selection::attributes(Block::new(), "checked-in")))
            .with_block(
                "item",
                item(Block::new().with_attribute("ids", computed_string_list("The Meraki Ids of the set of devices."))),
            )
    }

    fn read_behavior(&self) -> ReadBehavior {
        ReadBehavior::Warn
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request = SmDevicesCheckinRequest {
            selection: plan.parameters.as_ref().map(Selection::to_request).unwrap_or_default(),
        };

        debug!(operation = ops::CHECKIN_NETWORK_SM_DEVICES, network_id = %plan.network_id, "Calling Dashboard API");
        let devices = require_data(
            ops::CHECKIN_NETWORK_SM_DEVICES,
            client.checkin_network_sm_devices(&plan.network_id, &request).await,
        )?;
        encode(&State {
            plan,
            item: devices.into(),
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
    async fn test_checkin() {
        let mock = MockDashboardApi::new().with_response(
            ops::CHECKIN_NETWORK_SM_DEVICES,
            json!({"ids": ["1284392014819", "2983092129865"]}),
        );

        let state = NetworksSmDevicesCheckin
            .create(
                &mock,
                json!({
                    "network_id": "N_1",
                    "parameters": {"scope": ["withAny", "tag1"], "serials": []}
                }),
            )
            .await
            .unwrap();

        assert_eq!(state["item"]["ids"], json!(["1284392014819", "2983092129865"]));
        assert_eq!(
            mock.last_call(ops::CHECKIN_NETWORK_SM_DEVICES).unwrap().payload,
            Some(json!({"scope": ["withAny", "tag1"]}))
        );
        assert_state_matches_schema(&NetworksSmDevicesCheckin.schema(), &state);
    }
}
