//! `meraki_organizations_wireless_radio_auto_rf_channels_recalculate`:
//! recalculate AutoRF channel assignments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{item, optional_string_list, parameters, path_param};
use crate::catalog::{decode, encode, require_data, ActionResource};
use crate::client::models::{AutoRfRecalculateRequest, AutoRfRecalculation};
use crate::client::{ops, DashboardApi};
use crate::convert::non_empty_list;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /organizations/{organizationId}/wireless/radio/autoRf/channels/recalculate`.
pub struct OrganizationsWirelessRadioAutoRfChannelsRecalculate;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    organization_id: String,
    #[serde(default)]
    parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Parameters {
    #[serde(default)]
    network_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: RecalculationState,
}

#[derive(Debug, Serialize)]
struct RecalculationState {
    estimated_completed_at: Option<String>,
}

impl From<AutoRfRecalculation> for RecalculationState {
    fn from(recalculation: AutoRfRecalculation) -> Self {
        Self {
            estimated_completed_at: recalculation.estimated_completed_at,
        }
    }
}

#[async_trait]
impl ActionResource for OrganizationsWirelessRadioAutoRfChannelsRecalculate {
    fn type_name(&self) -> &'static str {
        "organizations_wireless_radio_auto_rf_channels_recalculate"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Recalculates automatically assigned channels for every AP within specified the specified network(s). Note: This could cause a brief loss in connectivity for wireless clients.")
            .with_attribute(
                "organization_id",
                path_param("organizationId path parameter. Organization ID"),
            )
            .with_block(
                "parameters",
                parameters(Block::new().with_attribute(
                    "network_ids",
                    optional_string_list("A list of network ids (limit: 15)."),
                )),
            )
            .with_block(
                "item",
                item(Block::new().with_attribute(
                    "estimated_completed_at",
                    Attribute::computed_string().with_description("Estimated time of completion."),
                )),
            )
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request = AutoRfRecalculateRequest {
            network_ids: plan
                .parameters
                .as_ref()
                .and_then(|p| non_empty_list(p.network_ids.clone())),
        };

        debug!(
            operation = ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS,
            organization_id = %plan.organization_id,
            "Calling Dashboard API"
        );
        let recalculation = require_data(
            ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS,
            client
                .recalculate_organization_wireless_radio_auto_rf_channels(&plan.organization_id, &request)
                .await,
        )?;
        encode(&State {
            plan,
            item: recalculation.into(),
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
    async fn test_recalculate() {
        let mock = MockDashboardApi::new().with_response(
            ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS,
            json!({"estimatedCompletedAt": "2023-10-24T23:55:47.000Z"}),
        );

        let state = OrganizationsWirelessRadioAutoRfChannelsRecalculate
            .create(
                &mock,
                json!({"organization_id": "2930418", "parameters": {"network_ids": ["N_1", "N_2"]}}),
            )
            .await
            .unwrap();

        assert_eq!(state["item"]["estimated_completed_at"], "2023-10-24T23:55:47.000Z");
        let call = mock
            .last_call(ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS)
            .unwrap();
        assert_eq!(call.params, vec!["2930418"]);
        assert_eq!(call.payload, Some(json!({"networkIds": ["N_1", "N_2"]})));
        assert_state_matches_schema(
            &OrganizationsWirelessRadioAutoRfChannelsRecalculate.schema(),
            &state,
        );
    }
}
