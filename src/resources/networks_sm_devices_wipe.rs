//! `meraki_networks_sm_devices_wipe`: wipe one Systems Manager device.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{item, parameters, path_param};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{SmDeviceWipeRequest, SmDeviceWiped};
use crate::client::{ops, DashboardApi};
use crate::convert::non_empty;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /networks/{networkId}/sm/devices/wipe`.
pub struct NetworksSmDevicesWipe;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    network_id: String,
    #[serde(default)]
    parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Parameters {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    pin: Option<i64>,
    #[serde(default)]
    serial: Option<String>,
    #[serde(default)]
    wifi_mac: Option<String>,
}

impl From<&Parameters> for SmDeviceWipeRequest {
    fn from(p: &Parameters) -> Self {
        Self {
            wifi_mac: non_empty(p.wifi_mac.clone()),
            id: non_empty(p.id.clone()),
            serial: non_empty(p.serial.clone()),
            pin: p.pin,
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: WipedState,
}

#[derive(Debug, Serialize)]
struct WipedState {
    id: Option<String>,
}

impl From<SmDeviceWiped> for WipedState {
    fn from(wiped: SmDeviceWiped) -> Self {
        Self { id: wiped.id }
    }
}

#[async_trait]
impl ActionResource for NetworksSmDevicesWipe {
    fn type_name(&self) -> &'static str {
        "networks_sm_devices_wipe"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description(
                "Wipe a device. Each resource applies the wipe once on create; destroying the resource only forgets it.",
            )
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_block(
                "parameters",
                parameters(
                    Block::new()
                        .with_attribute("id", Attribute::optional_string().with_description("The id of the device to be wiped."))
                        .with_attribute("pin", Attribute::optional_int64().with_description("The pin number (a six digit value) for wiping a macOS device. Required only for macOS devices."))
                        .with_attribute("serial", Attribute::optional_string().with_description("The serial of the device to be wiped."))
                        .with_attribute("wifi_mac", Attribute::optional_string().with_description("The wifiMac of the device to be wiped.")),
                ),
            )
            .with_block(
                "item",
                item(Block::new().with_attribute(
                    "id",
                    Attribute::computed_string().with_description("The Meraki Id of the devices."),
                )),
            )
    }

    fn read_behavior(&self) -> ReadBehavior {
        ReadBehavior::Warn
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request: SmDeviceWipeRequest = plan.parameters.as_ref().map(SmDeviceWipeRequest::from).unwrap_or_default();

        debug!(operation = ops::WIPE_NETWORK_SM_DEVICES, network_id = %plan.network_id, "Calling Dashboard API");
        let wiped = require_data(
            ops::WIPE_NETWORK_SM_DEVICES,
            client.wipe_network_sm_devices(&plan.network_id, &request).await,
        )?;
        info!(network_id = %plan.network_id, device = ?wiped.id, "Device wipe requested");

        encode(&State {
            plan,
            item: wiped.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardApi;
    use crate::provider::MerakiProvider;
    use crate::server::ProviderService;
    use crate::testing::{assert_state_matches_schema, ProviderTester};
    use serde_json::json;
    use std::sync::Arc;

    const TYPE: &str = "meraki_networks_sm_devices_wipe";

    #[tokio::test]
    async fn test_wipe_sends_only_set_fields() {
        let mock = MockDashboardApi::new().with_response(ops::WIPE_NETWORK_SM_DEVICES, json!({"id": "dev123"}));

        let state = NetworksSmDevicesWipe
            .create(
                &mock,
                json!({
                    "network_id": "N_1",
                    "parameters": {"id": "", "serial": "Q2YY-1111", "wifi_mac": ""},
                    "item": null
                }),
            )
            .await
            .unwrap();

        assert_eq!(state["item"]["id"], "dev123");
        assert_eq!(state["parameters"]["serial"], "Q2YY-1111");
        let call = mock.last_call(ops::WIPE_NETWORK_SM_DEVICES).unwrap();
        assert_eq!(call.params, vec!["N_1"]);
        assert_eq!(call.payload, Some(json!({"serial": "Q2YY-1111"})));
        assert_state_matches_schema(&NetworksSmDevicesWipe.schema(), &state);
    }

    #[tokio::test]
    async fn test_create_then_delete_is_local() {
        let mock = MockDashboardApi::new().with_response(ops::WIPE_NETWORK_SM_DEVICES, json!({"id": "dev123"}));
        let tester = ProviderTester::new(MerakiProvider::with_client(Arc::new(mock.clone())));

        let state = tester
            .lifecycle_create(
                TYPE,
                json!({
                    "network_id": "N_1",
                    "parameters": {"id": "", "serial": "Q2YY-1111", "wifi_mac": ""}
                }),
            )
            .await
            .unwrap();
        assert_eq!(state["item"]["id"], "dev123");
        assert_eq!(mock.call_count(ops::WIPE_NETWORK_SM_DEVICES), 1);

        let diagnostics = tester.lifecycle_delete(TYPE, state).await.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_wipe_keeps_prior_state() {
        let mock = MockDashboardApi::new().with_status(ops::WIPE_NETWORK_SM_DEVICES, 500, "Internal error");
        let provider = MerakiProvider::with_client(Arc::new(mock.clone()));

        let err = provider
            .create(TYPE, json!({"network_id": "N_1", "parameters": {"serial": "Q2YY-1111"}}))
            .await
            .unwrap_err();

        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Failure when executing WipeNetworkSmDevices");

        let prior = json!({"network_id": "N_1", "parameters": {"serial": "Q2YY-1111"}, "item": {"id": "old"}});
        let read = provider.read(TYPE, prior.clone()).await.unwrap();
        assert_eq!(read.state, prior);
    }
}
