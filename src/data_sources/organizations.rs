//! `meraki_organizations`: one organization by ID, or every organization the
//! API key can see when `organization_id` is unset.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{NameValueState, Paging};
use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::Organization;
use crate::client::{ops, DashboardApi};
use crate::convert::{list_or_empty, non_empty_ref};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /organizations/{organizationId}` or `GET /organizations`.
pub struct Organizations;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    #[serde(default)]
    organization_id: Option<String>,
    #[serde(flatten)]
    paging: Paging,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: Option<OrganizationState>,
    items: Option<Vec<OrganizationState>>,
}

#[derive(Debug, Serialize)]
struct OrganizationState {
    api: Option<ApiState>,
    cloud: Option<CloudState>,
    id: Option<String>,
    licensing: Option<LicensingState>,
    management: Option<ManagementState>,
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiState {
    enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
struct CloudState {
    region: Option<RegionState>,
}

#[derive(Debug, Serialize)]
struct RegionState {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct LicensingState {
    model: Option<String>,
}

#[derive(Debug, Serialize)]
struct ManagementState {
    details: Vec<NameValueState>,
}

impl From<Organization> for OrganizationState {
    fn from(org: Organization) -> Self {
        Self {
            api: org.api.map(|api| ApiState { enabled: api.enabled }),
            cloud: org.cloud.map(|cloud| CloudState {
                region: cloud.region.map(|region| RegionState { name: region.name }),
            }),
            id: org.id,
            licensing: org.licensing.map(|l| LicensingState { model: l.model }),
            management: org.management.map(|m| ManagementState {
                details: list_or_empty(m.details),
            }),
            name: org.name,
            url: org.url,
        }
    }
}

fn organization_block(description: &str) -> Block {
    Block::new()
        .with_description(description)
        .with_block(
            "api",
            NestedBlock::single(
                Block::new()
                    .with_description("API related settings")
                    .with_attribute("enabled", Attribute::computed_bool().with_description("Enable API access")),
            ),
        )
        .with_block(
            "cloud",
            NestedBlock::single(
                Block::new().with_description("Data for this organization").with_block(
                    "region",
                    NestedBlock::single(
                        Block::new()
                            .with_description("Region info")
                            .with_attribute("name", Attribute::computed_string().with_description("Name of region")),
                    ),
                ),
            ),
        )
        .with_attribute("id", Attribute::computed_string().with_description("Organization ID"))
        .with_block(
            "licensing",
            NestedBlock::single(
                Block::new()
                    .with_description("Licensing related settings")
                    .with_attribute("model", Attribute::computed_string().with_description("Organization licensing model. Can be 'co-term', 'per-device', or 'subscription'.")),
            ),
        )
        .with_block(
            "management",
            NestedBlock::single(
                Block::new()
                    .with_description("Information about the organization's management system")
                    .with_block("details", NameValueState::block("Details related to organization management, possibly empty")),
            ),
        )
        .with_attribute("name", Attribute::computed_string().with_description("Organization name"))
        .with_attribute("url", Attribute::computed_string().with_description("Organization URL"))
}

#[async_trait]
impl DataSource for Organizations {
    fn type_name(&self) -> &'static str {
        "organizations"
    }

    fn schema(&self) -> Schema {
        let schema = Schema::v0()
            .with_description(
                "Return an organization when `organization_id` is set, otherwise list the organizations that the user has privileges on",
            )
            .with_attribute(
                "organization_id",
                Attribute::optional_string().with_description("organizationId path parameter. Organization ID"),
            );
        Paging::attributes(schema, 9000)
            .with_block("item", NestedBlock::single(organization_block("The organization")))
            .with_block(
                "items",
                NestedBlock::list(organization_block("Array of ResponseOrganizationsGetOrganizations")),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;

        let (item, items) = match non_empty_ref(&config.organization_id) {
            Some(organization_id) => {
                debug!(operation = ops::GET_ORGANIZATION, organization_id, "Calling Dashboard API");
                let org = require_data(
                    ops::GET_ORGANIZATION,
                    client.get_organization(organization_id).await,
                )?;
                (Some(org.into()), None)
            },
            None => {
                debug!(operation = ops::GET_ORGANIZATIONS, "Calling Dashboard API");
                let orgs = require_data(
                    ops::GET_ORGANIZATIONS,
                    client.get_organizations(&config.paging.to_query()).await,
                )?;
                (None, Some(orgs.into_iter().map(OrganizationState::from).collect()))
            },
        };

        encode(&State { config, item, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardApi;
    use crate::testing::assert_state_matches_schema;
    use serde_json::json;

    fn organization() -> Value {
        json!({
            "id": "2930418",
            "name": "My organization",
            "url": "https://dashboard.meraki.com/o/VjjsAd/manage/organization/overview",
            "api": {"enabled": true},
            "licensing": {"model": "co-term"},
            "cloud": {"region": {"name": "North America"}},
            "management": {"details": [{"name": "MSP ID", "value": "123456"}]}
        })
    }

    #[tokio::test]
    async fn test_single_organization() {
        let mock = MockDashboardApi::new().with_response(ops::GET_ORGANIZATION, organization());

        let state = Organizations
            .read(&mock, json!({"organization_id": "2930418"}))
            .await
            .unwrap();

        assert_eq!(state["item"]["cloud"]["region"]["name"], "North America");
        assert_eq!(state["item"]["management"]["details"][0]["name"], "MSP ID");
        assert!(state["items"].is_null());
        assert_eq!(mock.operations(), vec![ops::GET_ORGANIZATION]);
        assert_state_matches_schema(&Organizations.schema(), &state);
    }

    #[tokio::test]
    async fn test_list_when_id_unset_or_empty() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_ORGANIZATIONS, json!([organization(), {"id": "2"}]));

        let state = Organizations
            .read(&mock, json!({"organization_id": "", "per_page": 5}))
            .await
            .unwrap();

        assert!(state["item"].is_null());
        assert_eq!(state["items"].as_array().unwrap().len(), 2);
        assert!(state["items"][1]["api"].is_null());
        assert_eq!(
            mock.last_call(ops::GET_ORGANIZATIONS).unwrap().payload,
            Some(json!([["perPage", "5"]]))
        );
        assert_state_matches_schema(&Organizations.schema(), &state);
    }
}
