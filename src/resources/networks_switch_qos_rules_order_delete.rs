//! `meraki_networks_switch_qos_rules_order_delete`: delete a switch QoS rule.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::path_param;
use crate::catalog::{decode, encode, require_success, ActionResource};
use crate::client::{ops, DashboardApi};
use crate::error::ProviderError;
use crate::schema::Schema;

/// Runs `DELETE /networks/{networkId}/switch/qosRules/{qosRuleId}`.
///
/// Creating this resource deletes the rule; destroying it does not restore
/// anything.
pub struct NetworksSwitchQosRulesOrderDelete;

#[derive(Debug, Deserialize, Serialize)]
struct Plan {
    network_id: String,
    qos_rule_id: String,
}

#[async_trait]
impl ActionResource for NetworksSwitchQosRulesOrderDelete {
    fn type_name(&self) -> &'static str {
        "networks_switch_qos_rules_order_delete"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Delete a quality of service rule")
            .with_attribute("network_id", path_param("networkId path parameter. Network ID"))
            .with_attribute("qos_rule_id", path_param("qosRuleId path parameter. Qos rule ID"))
    }

    async fn create(&self, client: &dyn DashboardApi, planned: Value) -> Result<Value, ProviderError> {
        let plan: Plan = decode(planned)?;
        debug!(
            operation = ops::DELETE_NETWORK_SWITCH_QOS_RULE,
            network_id = %plan.network_id,
            qos_rule_id = %plan.qos_rule_id,
            "Calling Dashboard API"
        );
        require_success(
            ops::DELETE_NETWORK_SWITCH_QOS_RULE,
            client
                .delete_network_switch_qos_rule(&plan.network_id, &plan.qos_rule_id)
                .await,
        )?;
        info!(network_id = %plan.network_id, qos_rule_id = %plan.qos_rule_id, "Deleted switch QoS rule");
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
    async fn test_delete_rule() {
        let mock = MockDashboardApi::new();

        let state = NetworksSwitchQosRulesOrderDelete
            .create(&mock, json!({"network_id": "N_1", "qos_rule_id": "1284392014819"}))
            .await
            .unwrap();

        assert_eq!(state["qos_rule_id"], "1284392014819");
        assert_eq!(
            mock.last_call(ops::DELETE_NETWORK_SWITCH_QOS_RULE).unwrap().params,
            vec!["N_1", "1284392014819"]
        );
        assert_state_matches_schema(&NetworksSwitchQosRulesOrderDelete.schema(), &state);
    }
}
