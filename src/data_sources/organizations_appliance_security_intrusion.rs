//! `meraki_organizations_appliance_security_intrusion`: IPS allow list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{decode, encode, require_data, DataSource};
use crate::client::models::{IntrusionRule, SecurityIntrusion};
use crate::client::{ops, DashboardApi};
use crate::convert::list_or_null;
use crate::error::ProviderError;
use crate::schema::{Attribute, Block, NestedBlock, Schema};

/// Reads `GET /organizations/{organizationId}/appliance/security/intrusion`.
pub struct OrganizationsApplianceSecurityIntrusion;

#[derive(Debug, Deserialize, Serialize)]
struct Config {
    organization_id: String,
}

#[derive(Debug, Serialize)]
struct State {
    #[serde(flatten)]
    config: Config,
    item: IntrusionState,
}

// A missing rule list stays null: an explicit empty allow list means
// something different.
#[derive(Debug, Serialize)]
struct IntrusionState {
    allowed_rules: Option<Vec<RuleState>>,
}

#[derive(Debug, Serialize)]
struct RuleState {
    message: Option<String>,
    rule_id: Option<String>,
}

impl From<IntrusionRule> for RuleState {
    fn from(rule: IntrusionRule) -> Self {
        Self {
            message: rule.message,
            rule_id: rule.rule_id,
        }
    }
}

impl From<SecurityIntrusion> for IntrusionState {
    fn from(intrusion: SecurityIntrusion) -> Self {
        Self {
            allowed_rules: list_or_null(intrusion.allowed_rules),
        }
    }
}

#[async_trait]
impl DataSource for OrganizationsApplianceSecurityIntrusion {
    fn type_name(&self) -> &'static str {
        "organizations_appliance_security_intrusion"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Returns all supported intrusion settings for an organization")
            .with_attribute(
                "organization_id",
                Attribute::path_param("organizationId path parameter. Organization ID"),
            )
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new().with_block(
                        "allowed_rules",
                        NestedBlock::list(
                            Block::new()
                                .with_description("Sets a list of specific SNORT signatures to allow")
                                .with_attribute("message", Attribute::computed_string().with_description("Message is optional and is ignored on a PUT call. It is allowed in order for PUT to be compatible with GET"))
                                .with_attribute("rule_id", Attribute::computed_string().with_description("A rule identifier of the format meraki:intrusion/snort/GID/<gid>/SID/<sid>. gid and sid can be obtained from either https://www.snort.org/rule-docs or as ruleIds from the security events in /organization/[orgId]/securityEvents")),
                        ),
                    ),
                ),
            )
    }

    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError> {
        let config: Config = decode(config)?;
        debug!(
            operation = ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION,
            organization_id = %config.organization_id,
            "Calling Dashboard API"
        );
        let intrusion = require_data(
            ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION,
            client
                .get_organization_appliance_security_intrusion(&config.organization_id)
                .await,
        )?;
        encode(&State {
            config,
            item: intrusion.into(),
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
    async fn test_read_allowed_rules() {
        let mock = MockDashboardApi::new().with_response(
            ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION,
            json!({
                "allowedRules": [{
                    "ruleId": "meraki:intrusion/snort/GID/01/SID/688",
                    "message": "SQL sa login failed"
                }]
            }),
        );

        let state = OrganizationsApplianceSecurityIntrusion
            .read(&mock, json!({"organization_id": "2930418"}))
            .await
            .unwrap();

        assert_eq!(
            state["item"]["allowed_rules"][0]["rule_id"],
            "meraki:intrusion/snort/GID/01/SID/688"
        );
        assert_state_matches_schema(&OrganizationsApplianceSecurityIntrusion.schema(), &state);
    }

    #[tokio::test]
    async fn test_missing_rules_stay_null() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION, json!({}));
        let state = OrganizationsApplianceSecurityIntrusion
            .read(&mock, json!({"organization_id": "2930418"}))
            .await
            .unwrap();
        assert!(state["item"]["allowed_rules"].is_null());
    }
}
