//! `meraki_administered_identities_me_api_keys`: API keys of the current user.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{encode, require_data, DataSource};
use crate::client::models::ApiKey;
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /administered/identities/me/api/keys`.
pub struct AdministeredIdentitiesMeApiKeys;

#[derive(Debug, Serialize)]
struct State {
    items: Vec<ApiKeyState>,
}

#[derive(Debug, Serialize)]
struct ApiKeyState {
    created_at: Option<String>,
    suffix: Option<String>,
}

impl From<ApiKey> for ApiKeyState {
    fn from(key: ApiKey) -> Self {
        Self {
            created_at: key.created_at,
            suffix: key.suffix,
        }
    }
}

#[async_trait]
impl DataSource for AdministeredIdentitiesMeApiKeys {
    fn type_name(&self) -> &'static str {
        "administered_identities_me_api_keys"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("List the non-sensitive metadata associated with the API keys that belong to the user")
            .with_block(
                "items",
                NestedBlock::list(
                    Block::new()
                        .with_description("Array of ResponseAdministeredGetAdministeredIdentitiesMeApiKeys")
                        .with_attribute("created_at", Attribute::computed_string().with_description("Time API key was created"))
                        .with_attribute("suffix", Attribute::computed_string().with_description("Last 4 characters of API key")),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, _config: Value) -> Result<Value, ProviderError> {
        debug!(operation = ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS, "Calling Dashboard API");
        let keys = require_data(
            ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            client.get_administered_identities_me_api_keys().await,
        )?;
        encode(&State {
            items: keys.into_iter().map(ApiKeyState::from).collect(),
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
    async fn test_keys_are_mapped_in_order() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            json!([
                {"createdAt": "2023-01-01", "suffix": "AB12"},
                {"createdAt": "2023-02-01", "suffix": "CD34"}
            ]),
        );

        let state = AdministeredIdentitiesMeApiKeys.read(&mock, json!({})).await.unwrap();

        assert_eq!(
            state["items"],
            json!([
                {"created_at": "2023-01-01", "suffix": "AB12"},
                {"created_at": "2023-02-01", "suffix": "CD34"}
            ])
        );
        assert_eq!(mock.call_count(ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS), 1);
        assert_state_matches_schema(&AdministeredIdentitiesMeApiKeys.schema(), &state);
    }

    #[tokio::test]
    async fn test_empty_list() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS, json!([]));
        let state = AdministeredIdentitiesMeApiKeys.read(&mock, json!({})).await.unwrap();
        assert_eq!(state["items"], json!([]));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock = MockDashboardApi::new().with_status(
            ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            401,
            "Invalid API key",
        );
        let err = AdministeredIdentitiesMeApiKeys.read(&mock, json!({})).await.unwrap_err();
        let diagnostics = err.to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].summary,
            "Failure when executing GetAdministeredIdentitiesMeApiKeys"
        );
    }
}
