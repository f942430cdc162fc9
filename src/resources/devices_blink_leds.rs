//! `meraki_devices_blink_leds`: blink the LEDs on a device.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{item, parameters, path_param};
use crate::catalog::{decode, encode, require_data, ActionResource};
use crate::client::models::{BlinkLeds, BlinkLedsRequest};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /devices/{serial}/blinkLeds`.
pub struct DevicesBlinkLeds;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    serial: String,
    #[serde(default)]
    parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Parameters {
    #[serde(default)]
    duration: Option<i64>,
    #[serde(default)]
    duty: Option<i64>,
    #[serde(default)]
    period: Option<i64>,
}

impl From<&Parameters> for BlinkLedsRequest {
    fn from(p: &Parameters) -> Self {
        Self {
            duration: p.duration,
            period: p.period,
            duty: p.duty,
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: BlinkState,
}

#[derive(Debug, Serialize)]
struct BlinkState {
    duration: Option<i64>,
    duty: Option<i64>,
    period: Option<i64>,
}

impl From<BlinkLeds> for BlinkState {
    fn from(blink: BlinkLeds) -> Self {
        Self {
            duration: blink.duration,
            duty: blink.duty,
            period: blink.period,
        }
    }
}

#[async_trait]
impl ActionResource for DevicesBlinkLeds {
    fn type_name(&self) -> &'static str {
        "devices_blink_leds"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Blink the LEDs on a device")
            .with_attribute("serial", path_param("serial path parameter."))
            .with_block(
                "parameters",
                parameters(
                    Block::new()
                        .with_attribute("duration", Attribute::optional_int64().with_description("The duration in seconds. Must be between 5 and 120. Default is 20 seconds"))
                        .with_attribute("duty", Attribute::optional_int64().with_description("The duty cycle as the percent active. Must be between 10 and 90. Default is 50."))
                        .with_attribute("period", Attribute::optional_int64().with_description("The period in milliseconds. Must be between 100 and 1000. Default is 160 milliseconds")),
                ),
            )
            .with_block(
                "item",
                item(
                    Block::new()
                        .with_attribute("duration", Attribute::computed_int64().with_description("The duration in seconds. Will be between 5 and 120. Default is 20 seconds"))
                        .with_attribute("duty", Attribute::computed_int64().with_description("The duty cycle as the percent active. Will be between 10 and 90. Default is 50"))
                        .with_attribute("period", Attribute::computed_int64().with_description("The period in milliseconds. Will be between 100 and 1000. Default is 160 milliseconds")),
                ),
            )
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request: BlinkLedsRequest = plan.parameters.as_ref().map(BlinkLedsRequest::from).unwrap_or_default();

        debug!(operation = ops::BLINK_DEVICE_LEDS, serial = %plan.serial, "Calling Dashboard API");
        let blink = require_data(
            ops::BLINK_DEVICE_LEDS,
            client.blink_device_leds(&plan.serial, &request).await,
        )?;
        encode(&State {
            plan,
            item: blink.into(),
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
    async fn test_blink_with_partial_parameters() {
        let mock = MockDashboardApi::new().with_response(
            ops::BLINK_DEVICE_LEDS,
            json!({"duration": 20, "period": 160, "duty": 50}),
        );

        let state = DevicesBlinkLeds
            .create(&mock, json!({"serial": "Q2XX-XXXX", "parameters": {"duration": 20}}))
            .await
            .unwrap();

        assert_eq!(state["item"]["period"], 160);
        assert!(state["parameters"]["period"].is_null());
        assert_eq!(
            mock.last_call(ops::BLINK_DEVICE_LEDS).unwrap().payload,
            Some(json!({"duration": 20}))
        );
        assert_state_matches_schema(&DevicesBlinkLeds.schema(), &state);
    }

    #[tokio::test]
    async fn test_blink_without_parameters_sends_empty_body() {
        let mock = MockDashboardApi::new().with_response(ops::BLINK_DEVICE_LEDS, json!({}));
        let state = DevicesBlinkLeds.create(&mock, json!({"serial": "Q2XX-XXXX"})).await.unwrap();

        assert!(state["parameters"].is_null());
        assert_eq!(mock.last_call(ops::BLINK_DEVICE_LEDS).unwrap().payload, Some(json!({})));
        assert_state_matches_schema(&DevicesBlinkLeds.schema(), &state);
    }
}
