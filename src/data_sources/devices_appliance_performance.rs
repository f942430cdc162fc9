//! `meraki_devices_appliance_performance`: MX performance score.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::{AppliancePerformance, AppliancePerformanceQuery};
use crate::client::{ops, DashboardApi};
use crate::convert::non_empty;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /devices/{serial}/appliance/performance`.
pub struct DevicesAppliancePerformance;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    serial: String,
    #[serde(default)]
    t0: Option<String>,
    #[serde(default)]
    t1: Option<String>,
    #[serde(default)]
    timespan: Option<f64>,
}

impl Config {
    fn query(&self) -> AppliancePerformanceQuery {
        AppliancePerformanceQuery {
            t0: non_empty(self.t0.clone()),
            t1: non_empty(self.t1.clone()),
            timespan: self.timespan,
        }
    }
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: PerformanceState,
}

#[derive(Debug, Serialize)]
struct PerformanceState {
    perf_score: Option<f64>,
}

impl From<AppliancePerformance> for PerformanceState {
    fn from(performance: AppliancePerformance) -> Self {
        Self {
            perf_score: performance.perf_score,
        }
    }
}

#[async_trait]
impl DataSource for DevicesAppliancePerformance {
    fn type_name(&self) -> &'static str {
        "devices_appliance_performance"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description(
                "Return the performance score for a single MX. Only primary MX devices supported. If no data is available, a 204 error code is returned.",
            )
            .with_attribute("serial", Attribute::path_param("serial path parameter."))
            .with_attribute(
                "t0",
                Attribute::optional_string()
                    .with_description("t0 query parameter. The beginning of the timespan for the data. The maximum lookback period is 30 days from today."),
            )
            .with_attribute(
                "t1",
                Attribute::optional_string()
                    .with_description("t1 query parameter. The end of the timespan for the data. t1 can be a maximum of 14 days after t0."),
            )
            .with_attribute(
                "timespan",
                Attribute::optional_float64().with_description(
                    "timespan query parameter. The timespan for which the information will be fetched. If specifying timespan, do not specify parameters t0 and t1. The value must be in seconds and be less than or equal to 14 days. The default is 30 minutes.",
                ),
            )
            .with_block(
                "item",
                NestedBlock::single(Block::new().with_attribute(
                    "perf_score",
                    Attribute::computed_float64().with_description("Performance score"),
                )),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(
            operation = ops::GET_DEVICE_APPLIANCE_PERFORMANCE,
            serial = %config.serial,
            "Calling Dashboard API"
        );
        let performance = require_data(
            ops::GET_DEVICE_APPLIANCE_PERFORMANCE,
            client
                .get_device_appliance_performance(&config.serial, &config.query())
                .await,
        )?;
        encode(&State {
            config,
            item: performance.into(),
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
    async fn test_missing_perf_score_is_null() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_DEVICE_APPLIANCE_PERFORMANCE,
            json!({"perfScore": null}),
        );

        let state = DevicesAppliancePerformance
            .read(&mock, json!({"serial": "Q2XX-XXXX"}))
            .await
            .unwrap();

        assert!(state["item"]["perf_score"].is_null());
        assert_ne!(state["item"]["perf_score"], json!(0));
        assert_state_matches_schema(&DevicesAppliancePerformance.schema(), &state);
    }

    #[tokio::test]
    async fn test_zero_perf_score_is_kept() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_DEVICE_APPLIANCE_PERFORMANCE, json!({"perfScore": 0.0}));

        let state = DevicesAppliancePerformance
            .read(&mock, json!({"serial": "Q2XX-XXXX"}))
            .await
            .unwrap();
        assert_eq!(state["item"]["perf_score"], json!(0.0));
    }

    #[tokio::test]
    async fn test_query_parameters() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_DEVICE_APPLIANCE_PERFORMANCE, json!({"perfScore": 92.5}));

        let state = DevicesAppliancePerformance
            .read(&mock, json!({"serial": "Q2XX-XXXX", "t0": "", "timespan": 1800.0}))
            .await
            .unwrap();

        assert_eq!(state["t0"], "");
        assert_eq!(state["item"]["perf_score"], 92.5);
        let call = mock.last_call(ops::GET_DEVICE_APPLIANCE_PERFORMANCE).unwrap();
        assert_eq!(call.payload, Some(json!([["timespan", "1800"]])));
    }
}
