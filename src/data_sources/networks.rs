//! `meraki_networks`: one network by ID.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{computed_string_list, computed_string_set};
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::Network;
use crate::client::{ops, DashboardApi};
use crate::convert::to_set;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /networks/{networkId}`.
pub struct Networks;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    network_id: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: NetworkState,
}

#[derive(Debug, Serialize)]
struct NetworkState {
    enrollment_string: Option<String>,
    id: Option<String>,
    is_bound_to_config_template: Option<bool>,
    name: Option<String>,
    notes: Option<String>,
    organization_id: Option<String>,
    product_types: Vec<String>,
    tags: Option<Vec<String>>,
    time_zone: Option<String>,
    url: Option<String>,
}

impl From<Network> for NetworkState {
    fn from(network: Network) -> Self {
        Self {
            enrollment_string: network.enrollment_string,
            id: network.id,
            is_bound_to_config_template: network.is_bound_to_config_template,
            name: network.name,
            notes: network.notes,
            organization_id: network.organization_id,
            product_types: to_set(network.product_types),
            tags: network.tags,
            time_zone: network.time_zone,
            url: network.url,
        }
    }
}

#[async_trait]
impl DataSource for Networks {
    fn type_name(&self) -> &'static str {
        "networks"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Return a network")
            .with_attribute("network_id", Attribute::path_param("networkId path parameter. Network ID"))
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new()
                        .with_attribute(
                            "enrollment_string",
                            Attribute::computed_string().with_description(
                                "Enrollment string for the network",
                            ),
                        )
                        .with_attribute("id", Attribute::computed_string().with_description("Network ID"))
                        .with_attribute(
                            "is_bound_to_config_template",
                            Attribute::computed_bool().with_description("If the network is bound to a config template"),
                        )
                        .with_attribute("name", Attribute::computed_string().with_description("Network name"))
                        .with_attribute("notes", Attribute::computed_string().with_description("Notes for the network"))
                        .with_attribute("organization_id", Attribute::computed_string().with_description("Organization ID"))
                        .with_attribute("product_types", computed_string_set("List of the product types that the network supports"))
                        .with_attribute("tags", computed_string_list("Network tags"))
                        .with_attribute("time_zone", Attribute::computed_string().with_description("Timezone of the network"))
                        .with_attribute("url", Attribute::computed_string().with_description("URL to the network Dashboard UI")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(operation = ops::GET_NETWORK, network_id = %config.network_id, "Calling Dashboard API");
        let network = require_data(ops::GET_NETWORK, client.get_network(&config.network_id).await)?;
        encode(&State {
            config,
            item: network.into(),
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
    async fn test_read_network() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_NETWORK,
            json!({
                "id": "N_24329156",
                "organizationId": "2930418",
                "name": "Main Office",
                "productTypes": ["wireless", "appliance", "switch", "appliance"],
                "timeZone": "America/Los_Angeles",
                "tags": ["tag1", "tag2"],
                "isBoundToConfigTemplate": false
            }),
        );

        let state = Networks.read(&mock, json!({"network_id": "N_24329156"})).await.unwrap();

        assert_eq!(state["network_id"], "N_24329156");
        assert_eq!(state["item"]["product_types"], json!(["appliance", "switch", "wireless"]));
        assert_eq!(state["item"]["tags"], json!(["tag1", "tag2"]));
        assert_eq!(state["item"]["is_bound_to_config_template"], false);
        assert!(state["item"]["notes"].is_null());
        assert_state_matches_schema(&Networks.schema(), &state);
    }

    #[tokio::test]
    async fn test_error_names_operation() {
        let mock = MockDashboardApi::new().with_error(ops::GET_NETWORK, "Invalid network");
        let err = Networks.read(&mock, json!({"network_id": "N_1"})).await.unwrap_err();
        assert_eq!(err.to_diagnostics()[0].summary, "Failure when executing GetNetwork");
    }
}
