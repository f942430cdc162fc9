//! `meraki_networks_sm_devices_lock`: lock Systems Manager devices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, item, parameters, path_param, Selection};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{SmDeviceIds, SmDevicesLockRequest};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /networks/{networkId}/sm/devices/lock`.
pub struct NetworksSmDevicesLock;

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
    pin: Option<i64>,
}

impl From<&Parameters> for SmDevicesLockRequest {
    fn from(p: &Parameters) -> Self {
        Self {
            selection: p.selection.to_request(),
            pin: p.pin,
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: LockedState,
}

#[derive(Debug, Serialize)]
struct LockedState {
    ids: Vec<String>,
}

impl From<SmDeviceIds> for LockedState {
    fn from(devices: SmDeviceIds) -> Self {
        Self {
            ids: devices.ids.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ActionResource for NetworksSmDevicesLock {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices_lock"
    }

    fn schema(&self) -> Schema {
        let parameters_block = Selection::attributes(Block::new(), "locked").with_attribute(
            "pin",
            Attribute::optional_int64().with_description("The pin number for locking macOS devices (a six digit number). Required only for macOS devices."),
        );

        Schema::v0()
            .with_description("Lock a set of devices")
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_block("parameters", parameters(parameters_block))
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
        let request = plan
            .parameters
            .as_ref()
            .map(SmDevicesLockRequest::from)
            .unwrap_or_default();

        debug!(operation = ops::LOCK_NETWORK_SM_DEVICES, network_id = %plan.network_id, "Calling Dashboard API");
        let devices = require_data(
            ops::LOCK_NETWORK_SM_DEVICES,
            client.lock_network_sm_devices(&plan.network_id, &request).await,
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
    async fn test_lock_with_pin() {
        let mock = MockDashboardApi::new()
            .with_response(ops::LOCK_NETWORK_SM_DEVICES, json!({"ids": ["1284392014819"]}));

        let state = NetworksSmDevicesLock
            .create(
                &mock,
                json!({
                    "network_id": "N_1",
                    "parameters": {"ids": ["1284392014819"], "pin": 123456}
                }),
            )
            .await
            .unwrap();

        assert_eq!(state["parameters"]["pin"], 123456);
        assert!(state["parameters"]["wifi_macs"].is_null());
        assert_eq!(
            mock.last_call(ops::LOCK_NETWORK_SM_DEVICES).unwrap().payload,
            Some(json!({"ids": ["1284392014819"], "pin": 123456}))
        );
        assert_state_matches_schema(&NetworksSmDevicesLock.schema(), &state);
    }

    #[tokio::test]
    async fn test_missing_ids_default_to_empty() {
        let mock = MockDashboardApi::new().with_response(ops::LOCK_NETWORK_SM_DEVICES, json!({}));
        let state = NetworksSmDevicesLock
            .create(&mock, json!({"network_id": "N_1"}))
            .await
            .unwrap();
        assert_eq!(state["item"]["ids"], json!([]));
    }
}
