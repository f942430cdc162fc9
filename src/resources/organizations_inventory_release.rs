//! `meraki_organizations_inventory_release`: release devices from an
//! organization's inventory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{computed_string_list, item, optional_string_list, parameters, path_param};
use crate::catalog::{decode, encode, require_data, ActionResource, ReadBehavior};
use crate::client::models::{InventoryRelease, InventoryReleaseRequest};
use crate::client::{ops, DashboardApi};
use crate::convert::non_empty_list;
use crate::error::ProviderError;
use crate::schema::{Block, Schema};

/// Runs `POST /organizations/{organizationId}/inventory/release`.
pub struct OrganizationsInventoryRelease;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    organization_id: String,
    #[serde(default)]
    parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Parameters {
    #[serde(default)]
    serials: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    plan: Plan,
    item: ReleasedState,
}

#[derive(Debug, Serialize)]
struct ReleasedState {
    serials: Vec<String>,
}

impl From<InventoryRelease> for ReleasedState {
    fn from(release: InventoryRelease) -> Self {
        Self {
            serials: release.serials.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ActionResource for OrganizationsInventoryRelease {
    fn type_name(&self) -> &'static str {
        "organizations_inventory_release"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Release a list of claimed devices from an organization.")
            .with_attribute(
                "organization_id",
                path_param("organizationId path parameter. Organization ID"),
            )
            .with_block(
                "parameters",
                parameters(Block::new().with_attribute(
                    "serials",
                    optional_string_list("Serials of the devices that should be released"),
                )),
            )
            .with_block(
                "item",
                item(Block::new().with_attribute(
                    "serials",
                    computed_string_list("Serials of the devices that were released"),
                )),
            )
    }

    fn read_behavior(&self) -> ReadBehavior {
        ReadBehavior::Warn
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        let request = InventoryReleaseRequest {
            serials: plan
                .parameters
                .as_ref()
                .and_then(|p| non_empty_list(p.serials.clone())),
        };

        debug!(
            operation = ops::RELEASE_FROM_ORGANIZATION_INVENTORY,
            organization_id = %plan.organization_id,
            "Calling Dashboard API"
        );
        let released = require_data(
            ops::RELEASE_FROM_ORGANIZATION_INVENTORY,
            client
                .release_from_organization_inventory(&plan.organization_id, &request)
                .await,
        )?;
        info!(
            organization_id = %plan.organization_id,
            count = released.serials.as_ref().map_or(0, Vec::len),
            "Released devices from inventory"
        );
        encode(&State {
            plan,
            item: released.into(),
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
    async fn test_release() {
        let mock = MockDashboardApi::new().with_response(
            ops::RELEASE_FROM_ORGANIZATION_INVENTORY,
            json!({"serials": ["Q234-ABCD-5678"]}),
        );

        let state = OrganizationsInventoryRelease
            .create(
                &mock,
                json!({"organization_id": "2930418", "parameters": {"serials": ["Q234-ABCD-5678"]}}),
            )
            .await
            .unwrap();

        assert_eq!(state["item"]["serials"], json!(["Q234-ABCD-5678"]));
        assert_eq!(
            mock.last_call(ops::RELEASE_FROM_ORGANIZATION_INVENTORY).unwrap().payload,
            Some(json!({"serials": ["Q234-ABCD-5678"]}))
        );
        assert_state_matches_schema(&OrganizationsInventoryRelease.schema(), &state);
    }

    #[tokio::test]
    async fn test_release_nil_result() {
        let mock = MockDashboardApi::new().with_response(ops::RELEASE_FROM_ORGANIZATION_INVENTORY, Value::Null);
        let err = OrganizationsInventoryRelease
            .create(&mock, json!({"organization_id": "2930418"}))
            .await
            .unwrap_err();
        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].summary,
            "Failure when executing ReleaseFromOrganizationInventory"
        );
    }
}
