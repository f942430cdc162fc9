//! `meraki_administered_identities_me_api_keys_revoke`: revoke one of the
//! current user's API keys.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::path_param;
use crate::catalog::{decode, encode, require_success, ActionResource};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::Schema;

/// Runs `POST /administered/identities/me/api/keys/{suffix}/revoke`.
///
/// The endpoint answers `204`, so state is the plan alone.
pub struct AdministeredIdentitiesMeApiKeysRevoke;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    suffix: String,
}

#[async_trait]
impl ActionResource for AdministeredIdentitiesMeApiKeysRevoke {
    fn type_name(&self) -> &'static str {
        "administered_identities_me_api_keys_revoke"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Revokes an identity's API key, using the last four characters of the key")
            .with_attribute("suffix", path_param("suffix path parameter."))
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        debug!(operation = ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS, suffix = %plan.suffix, "Calling Dashboard API");
        require_success(
            ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            client
                .revoke_administered_identities_me_api_keys(&plan.suffix)
                .await,
        )?;
        info!(suffix = %plan.suffix, "Revoked Dashboard API key");
        encode(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDashboardApi;
    use crate::testing::assert_state_matches_schema;
    use serde_json::json;

    #[tokio::test]
    async fn test_revoke_persists_plan() {
        let mock = MockDashboardApi::new();

        let state = AdministeredIdentitiesMeApiKeysRevoke
            .create(&mock, json!({"suffix": "AB12"}))
            .await
            .unwrap();

        assert_eq!(state, json!({"suffix": "AB12"}));
        assert_eq!(
            mock.last_call(ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS).unwrap().params,
            vec!["AB12"]
        );
        assert_state_matches_schema(&AdministeredIdentitiesMeApiKeysRevoke.schema(), &state);
    }

    #[tokio::test]
    async fn test_revoke_unknown_key() {
        let mock = MockDashboardApi::new().with_status(
            ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            404,
            "Key not found",
        );
        let err = AdministeredIdentitiesMeApiKeysRevoke
            .create(&mock, json!({"suffix": "ZZ99"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_diagnostics().len(), 1);
    }
}
