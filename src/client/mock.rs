//! Mock Dashboard client for unit testing
//!
//! Responses are canned per operation id as raw JSON, so tests describe the
//! API exactly as the Dashboard would answer. Every call is logged with its
//! path parameters and request payload.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::api::{ops, ApiResponse, DashboardApi};
use super::error::ClientError;
use super::models::*;
use super::query::ToQuery;

/// A canned reply for one operation.
#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Status(u16, String),
}

/// A call recorded by [`MockDashboardApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Operation id, e.g. `WipeNetworkSmDevices`.
    pub operation: String,
    /// Path parameters in URL order.
    pub params: Vec<String>,
    /// Request body, or query pairs as `[[name, value], ...]`.
    pub payload: Option<Value>,
}

/// Mock [`DashboardApi`] for testing
#[derive(Clone, Default)]
pub struct MockDashboardApi {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDashboardApi {
    /// Create a mock with no canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` with `body` (status 200).
    ///
    /// `Value::Null` simulates a successful call with no body.
    pub fn with_response(self, operation: &str, body: Value) -> Self {
        lock(&self.replies).insert(operation.to_string(), Reply::Body(body));
        self
    }

    /// Answer `operation` with a non-success status.
    pub fn with_status(self, operation: &str, status: u16, message: impl Into<String>) -> Self {
        lock(&self.replies).insert(operation.to_string(), Reply::Status(status, message.into()));
        self
    }

    /// Answer `operation` with a generic 400 error.
    pub fn with_error(self, operation: &str, message: impl Into<String>) -> Self {
        self.with_status(operation, 400, message)
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Operation ids called so far, in order.
    pub fn operations(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.operation.clone()).collect()
    }

    /// How many times `operation` was called.
    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// The most recent call to `operation`.
    pub fn last_call(&self, operation: &str) -> Option<MockCall> {
        lock(&self.calls)
            .iter()
            .rev()
            .find(|c| c.operation == operation)
            .cloned()
    }

    fn record(&self, operation: &str, params: &[&str], payload: Option<Value>) {
        lock(&self.calls).push(MockCall {
            operation: operation.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            payload,
        });
    }

    fn respond<T: DeserializeOwned>(&self, operation: &str) -> Result<ApiResponse<T>, ClientError> {
        let reply = lock(&self.replies).get(operation).cloned();
        match reply {
            Some(Reply::Body(Value::Null)) => Ok(ApiResponse::empty(200)),
            Some(Reply::Body(body)) => Ok(ApiResponse::ok(serde_json::from_value(body)?)),
            Some(Reply::Status(status, message)) => Err(ClientError::from_status(status, message)),
            None => Err(ClientError::InvalidRequest(format!(
                "no canned response for {}",
                operation
            ))),
        }
    }

    fn respond_no_content(&self, operation: &str) -> Result<ApiResponse<()>, ClientError> {
        match lock(&self.replies).get(operation).cloned() {
            Some(Reply::Status(status, message)) => Err(ClientError::from_status(status, message)),
            _ => Ok(ApiResponse::empty(204)),
        }
    }

    fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[&str],
        payload: Option<Value>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.record(operation, params, payload);
        self.respond(operation)
    }
}

fn body<B: Serialize>(request: &B) -> Option<Value> {
    serde_json::to_value(request).ok()
}

fn query<Q: ToQuery>(query: &Q) -> Option<Value> {
    let pairs = query.to_query();
    if pairs.is_empty() {
        return None;
    }
    Some(Value::Array(
        pairs
            .pairs()
            .iter()
            .map(|(k, v)| Value::Array(vec![Value::from(k.as_str()), Value::from(v.as_str())]))
            .collect(),
    ))
}

#[async_trait]
impl DashboardApi for MockDashboardApi {
    async fn get_administered_identities_me(&self) -> Result<ApiResponse<Identity>, ClientError> {
        self.call(ops::GET_ADMINISTERED_IDENTITIES_ME, &[], None)
    }

    async fn get_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<Vec<ApiKey>>, ClientError> {
        self.call(ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS, &[], None)
    }

    async fn generate_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<GeneratedApiKey>, ClientError> {
        self.call(ops::GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS, &[], None)
    }

    async fn revoke_administered_identities_me_api_keys(
        &self,
        suffix: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        self.record(ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS, &[suffix], None);
        self.respond_no_content(ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS)
    }

    async fn get_device(&self, serial: &str) -> Result<ApiResponse<Device>, ClientError> {
        self.call(ops::GET_DEVICE, &[serial], None)
    }

    async fn get_device_appliance_performance(
        &self,
        serial: &str,
        q: &AppliancePerformanceQuery,
    ) -> Result<ApiResponse<AppliancePerformance>, ClientError> {
        self.call(ops::GET_DEVICE_APPLIANCE_PERFORMANCE, &[serial], query(q))
    }

    async fn get_device_camera_sense(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<CameraSense>, ClientError> {
        self.call(ops::GET_DEVICE_CAMERA_SENSE, &[serial], None)
    }

    async fn get_device_switch_ports(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<Vec<SwitchPort>>, ClientError> {
        self.call(ops::GET_DEVICE_SWITCH_PORTS, &[serial], None)
    }

    async fn get_device_wireless_status(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<WirelessStatus>, ClientError> {
        self.call(ops::GET_DEVICE_WIRELESS_STATUS, &[serial], None)
    }

    async fn blink_device_leds(
        &self,
        serial: &str,
        request: &BlinkLedsRequest,
    ) -> Result<ApiResponse<BlinkLeds>, ClientError> {
        self.call(ops::BLINK_DEVICE_LEDS, &[serial], body(request))
    }

    async fn reboot_device(&self, serial: &str) -> Result<ApiResponse<RebootResult>, ClientError> {
        self.call(ops::REBOOT_DEVICE, &[serial], None)
    }

    async fn get_network(&self, network_id: &str) -> Result<ApiResponse<Network>, ClientError> {
        self.call(ops::GET_NETWORK, &[network_id], None)
    }

    async fn get_network_sm_devices(
        &self,
        network_id: &str,
        q: &SmDevicesQuery,
    ) -> Result<ApiResponse<Vec<SmDevice>>, ClientError> {
        self.call(ops::GET_NETWORK_SM_DEVICES, &[network_id], query(q))
    }

    async fn get_network_wireless_ssids(
        &self,
        network_id: &str,
    ) -> Result<ApiResponse<Vec<WirelessSsid>>, ClientError> {
        self.call(ops::GET_NETWORK_WIRELESS_SSIDS, &[network_id], None)
    }

    async fn checkin_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesCheckinRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError> {
        self.call(ops::CHECKIN_NETWORK_SM_DEVICES, &[network_id], body(request))
    }

    async fn lock_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesLockRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError> {
        self.call(ops::LOCK_NETWORK_SM_DEVICES, &[network_id], body(request))
    }

    async fn modify_network_sm_devices_tags(
        &self,
        network_id: &str,
        request: &SmDevicesModifyTagsRequest,
    ) -> Result<ApiResponse<Vec<SmDeviceTags>>, ClientError> {
        self.call(ops::MODIFY_NETWORK_SM_DEVICES_TAGS, &[network_id], body(request))
    }

    async fn move_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesMoveRequest,
    ) -> Result<ApiResponse<SmDevicesMoved>, ClientError> {
        self.call(ops::MOVE_NETWORK_SM_DEVICES, &[network_id], body(request))
    }

    async fn wipe_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDeviceWipeRequest,
    ) -> Result<ApiResponse<SmDeviceWiped>, ClientError> {
        self.call(ops::WIPE_NETWORK_SM_DEVICES, &[network_id], body(request))
    }

    async fn delete_network_switch_qos_rule(
        &self,
        network_id: &str,
        qos_rule_id: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        self.record(ops::DELETE_NETWORK_SWITCH_QOS_RULE, &[network_id, qos_rule_id], None);
        self.respond_no_content(ops::DELETE_NETWORK_SWITCH_QOS_RULE)
    }

    async fn get_organizations(
        &self,
        q: &PageQuery,
    ) -> Result<ApiResponse<Vec<Organization>>, ClientError> {
        self.call(ops::GET_ORGANIZATIONS, &[], query(q))
    }

    async fn get_organization(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<Organization>, ClientError> {
        self.call(ops::GET_ORGANIZATION, &[organization_id], None)
    }

    async fn get_organization_inventory_devices(
        &self,
        organization_id: &str,
        q: &InventoryDevicesQuery,
    ) -> Result<ApiResponse<Vec<InventoryDevice>>, ClientError> {
        self.call(ops::GET_ORGANIZATION_INVENTORY_DEVICES, &[organization_id], query(q))
    }

    async fn get_organization_appliance_security_intrusion(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<SecurityIntrusion>, ClientError> {
        self.call(ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION, &[organization_id], None)
    }

    async fn release_from_organization_inventory(
        &self,
        organization_id: &str,
        request: &InventoryReleaseRequest,
    ) -> Result<ApiResponse<InventoryRelease>, ClientError> {
        self.call(ops::RELEASE_FROM_ORGANIZATION_INVENTORY, &[organization_id], body(request))
    }

    async fn recalculate_organization_wireless_radio_auto_rf_channels(
        &self,
        organization_id: &str,
        request: &AutoRfRecalculateRequest,
    ) -> Result<ApiResponse<AutoRfRecalculation>, ClientError> {
        self.call(
            ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS,
            &[organization_id],
            body(request),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_canned_body_is_decoded_and_call_logged() {
        let mock = MockDashboardApi::new()
            .with_response(ops::GET_DEVICE, json!({"serial": "Q2XX", "name": "lobby"}));

        let response = mock.get_device("Q2XX").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.data.unwrap().name.as_deref(), Some("lobby"));

        assert_eq!(mock.call_count(ops::GET_DEVICE), 1);
        assert_eq!(mock.last_call(ops::GET_DEVICE).unwrap().params, vec!["Q2XX"]);
    }

    #[tokio::test]
    async fn test_null_body_yields_no_data() {
        let mock = MockDashboardApi::new().with_response(ops::GET_NETWORK, Value::Null);
        let response = mock.get_network("N_1").await.unwrap();
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_status_reply_maps_to_client_error() {
        let mock = MockDashboardApi::new().with_status(ops::GET_DEVICE, 404, "no such device");
        let err = mock.get_device("Q2XX").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_reply_is_an_error() {
        let mock = MockDashboardApi::new();
        assert!(mock.reboot_device("Q2XX").await.is_err());
        assert_eq!(mock.operations(), vec![ops::REBOOT_DEVICE.to_string()]);
    }

    #[tokio::test]
    async fn test_request_payloads_recorded() {
        let mock = MockDashboardApi::new()
            .with_response(ops::WIPE_NETWORK_SM_DEVICES, json!({"id": "dev123"}));
        let request = SmDeviceWipeRequest {
            serial: Some("Q2YY-1111".to_string()),
            ..Default::default()
        };
        mock.wipe_network_sm_devices("N_1", &request).await.unwrap();

        let call = mock.last_call(ops::WIPE_NETWORK_SM_DEVICES).unwrap();
        assert_eq!(call.payload, Some(json!({"serial": "Q2YY-1111"})));

        let q = PageQuery {
            per_page: Some(5),
            ..Default::default()
        };
        let _ = mock.get_organizations(&q).await;
        assert_eq!(
            mock.last_call(ops::GET_ORGANIZATIONS).unwrap().payload,
            Some(json!([["perPage", "5"]]))
        );
    }

    #[tokio::test]
    async fn test_no_content_endpoints_succeed_without_reply() {
        let mock = MockDashboardApi::new();
        let response = mock.delete_network_switch_qos_rule("N_1", "rule-1").await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.data.is_none());
    }
}
