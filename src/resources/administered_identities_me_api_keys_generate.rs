//! `meraki_administered_identities_me_api_keys_generate`: generate an API key
//! for the current user.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::item;
use crate::catalog::{encode, require_data, ActionResource};
use crate::client::models::GeneratedApiKey;
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, Schema};

/// Runs `POST /administered/identities/me/api/keys/generate`.
pub struct AdministeredIdentitiesMeApiKeysGenerate;

#[derive(Debug, Serialize)]
struct State {
    item: GeneratedState,
}

#[derive(Debug, Serialize)]
struct GeneratedState {
    key: Option<String>,
}

impl From<GeneratedApiKey> for GeneratedState {
    fn from(generated: GeneratedApiKey) -> Self {
        Self { key: generated.key }
    }
}

#[async_trait]
impl ActionResource for AdministeredIdentitiesMeApiKeysGenerate {
    fn type_name(&self) -> &'static str {
        "administered_identities_me_api_keys_generate"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Generates an API key for an identity. The key is only returned once and is stored in state.")
            .with_block(
                "item",
                item(Block::new().with_attribute(
                    "key",
                    Attribute::computed_string()
                        .sensitive()
                        .with_description("API key in plaintext. This value will not be accessible outside of key generation"),
                )),
            )
    }

    async fn create(&self, client: &dyn DashboardApi, _planned: Value) -> Result<Value, ProviderError> {
        debug!(operation = ops::GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS, "Calling Dashboard API");
        let generated = require_data(
            ops::GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            client.generate_administered_identities_me_api_keys().await,
        )?;
        info!("Generated a new Dashboard API key");
        encode(&State {
            item: generated.into(),
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
    async fn test_generate() {
        let mock = MockDashboardApi::new().with_response(
            ops::GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            json!({"key": "1234567890abcdef1234567890abcdef12345678"}),
        );

        let state = AdministeredIdentitiesMeApiKeysGenerate.create(&mock, json!({})).await.unwrap();

        assert_eq!(state["item"]["key"], "1234567890abcdef1234567890abcdef12345678");
        assert!(
            AdministeredIdentitiesMeApiKeysGenerate.schema().block.blocks["item"].block.attributes["key"]
                .flags
                .sensitive
        );
        assert_state_matches_schema(&AdministeredIdentitiesMeApiKeysGenerate.schema(), &state);
    }
}
