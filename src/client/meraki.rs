//! Dashboard API client
//!
//! Thin reqwest wrapper: one request per call, no retries, no pagination.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::api::{ops, ApiResponse, DashboardApi};
use super::error::ClientError;
use super::models::*;
use super::query::{Query, ToQuery};

/// Dashboard base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings needed to build a [`MerakiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Dashboard API key, sent as a bearer token.
    pub api_key: String,
    /// API root, without trailing slash.
    pub base_url: String,
    /// Log request and response bodies at debug level.
    pub debug: bool,
    /// Appended to the User-Agent to identify the integration.
    pub caller: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            caller: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The User-Agent sent with every request.
    pub fn user_agent(&self) -> String {
        let base = format!("meraki-provider/{}", env!("CARGO_PKG_VERSION"));
        match self.caller.as_deref().filter(|c| !c.is_empty()) {
            Some(caller) => format!("{} {}", base, caller),
            None => base,
        }
    }
}

/// Meraki Dashboard API client
pub struct MerakiClient {
    http: Client,
    base_url: String,
    debug: bool,
}

impl MerakiClient {
    /// Create a new client.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", options.api_key))
            .map_err(|_| ClientError::InvalidRequest("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            debug: options.debug,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: Query,
    ) -> Result<ApiResponse<T>, ClientError> {
        debug!(operation, path, "GET");
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        self.send(operation, request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ClientError> {
        debug!(operation, path, "POST");
        let mut request = self.request(Method::POST, path);
        if let Some(body) = body {
            let payload = serde_json::to_string(body)?;
            if self.debug {
                debug!(operation, body = %payload, "request body");
            }
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload);
        }
        self.send(operation, request).await
    }

    /// Send a request whose response body, if any, is ignored.
    async fn send_no_content(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<()>, ClientError> {
        let (status, _) = self.execute(operation, request).await?;
        Ok(ApiResponse::empty(status))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let (status, body) = self.execute(operation, request).await?;
        Ok(ApiResponse {
            status,
            data: decode_body(status, &body)?,
        })
    }

    async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<(u16, String), ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.debug {
            debug!(operation, status, body = %body, "response body");
        }

        if !(200..300).contains(&status) {
            return Err(ClientError::from_status(status, error_message(&body)));
        }
        Ok((status, body))
    }
}

/// Percent-encode one path parameter so it stays a single segment.
///
/// `.` and `..` are rejected: the URL parser resolves them even when encoded.
fn segment(value: &str) -> Result<Cow<'_, str>, ClientError> {
    match value {
        "" | "." | ".." => Err(ClientError::InvalidRequest(format!(
            "invalid path parameter {:?}",
            value
        ))),
        _ => Ok(urlencoding::encode(value)),
    }
}

/// Decode a success body; `204`, blank and `null` bodies yield `None`.
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ClientError> {
    if status == 204 || body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Join Meraki's `{"errors": [...]}` payload, falling back to the raw body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join(", "),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl DashboardApi for MerakiClient {
    async fn get_administered_identities_me(&self) -> Result<ApiResponse<Identity>, ClientError> {
        self.get(ops::GET_ADMINISTERED_IDENTITIES_ME, "/administered/identities/me", Query::new())
            .await
    }

    async fn get_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<Vec<ApiKey>>, ClientError> {
        self.get(
            ops::GET_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            "/administered/identities/me/api/keys",
            Query::new(),
        )
        .await
    }

    async fn generate_administered_identities_me_api_keys(
        &self,
    ) -> Result<ApiResponse<GeneratedApiKey>, ClientError> {
        self.post::<(), _>(
            ops::GENERATE_ADMINISTERED_IDENTITIES_ME_API_KEYS,
            "/administered/identities/me/api/keys/generate",
            None,
        )
        .await
    }

    async fn revoke_administered_identities_me_api_keys(
        &self,
        suffix: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let path = format!(
            "/administered/identities/me/api/keys/{}/revoke",
            segment(suffix)?
        );
        debug!(operation = ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS, path = %path, "POST");
        let request = self.request(Method::POST, &path);
        self.send_no_content(ops::REVOKE_ADMINISTERED_IDENTITIES_ME_API_KEYS, request)
            .await
    }

    async fn get_device(&self, serial: &str) -> Result<ApiResponse<Device>, ClientError> {
        self.get(ops::GET_DEVICE, &format!("/devices/{}", segment(serial)?), Query::new())
            .await
    }

    async fn get_device_appliance_performance(
        &self,
        serial: &str,
        query: &AppliancePerformanceQuery,
    ) -> Result<ApiResponse<AppliancePerformance>, ClientError> {
        self.get(
            ops::GET_DEVICE_APPLIANCE_PERFORMANCE,
            &format!("/devices/{}/appliance/performance", segment(serial)?),
            query.to_query(),
        )
        .await
    }

    async fn get_device_camera_sense(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<CameraSense>, ClientError> {
        self.get(
            ops::GET_DEVICE_CAMERA_SENSE,
            &format!("/devices/{}/camera/sense", segment(serial)?),
            Query::new(),
        )
        .await
    }

    async fn get_device_switch_ports(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<Vec<SwitchPort>>, ClientError> {
        self.get(
            ops::GET_DEVICE_SWITCH_PORTS,
            &format!("/devices/{}/switch/ports", segment(serial)?),
            Query::new(),
        )
        .await
    }

    async fn get_device_wireless_status(
        &self,
        serial: &str,
    ) -> Result<ApiResponse<WirelessStatus>, ClientError> {
        self.get(
            ops::GET_DEVICE_WIRELESS_STATUS,
            &format!("/devices/{}/wireless/status", segment(serial)?),
            Query::new(),
        )
        .await
    }

    async fn blink_device_leds(
        &self,
        serial: &str,
        request: &BlinkLedsRequest,
    ) -> Result<ApiResponse<BlinkLeds>, ClientError> {
        self.post(
            ops::BLINK_DEVICE_LEDS,
            &format!("/devices/{}/blinkLeds", segment(serial)?),
            Some(request),
        )
        .await
    }

    async fn reboot_device(&self, serial: &str) -> Result<ApiResponse<RebootResult>, ClientError> {
        self.post::<(), _>(
            ops::REBOOT_DEVICE,
            &format!("/devices/{}/reboot", segment(serial)?),
            None,
        )
        .await
    }

    async fn get_network(&self, network_id: &str) -> Result<ApiResponse<Network>, ClientError> {
        self.get(ops::GET_NETWORK, &format!("/networks/{}", segment(network_id)?), Query::new())
            .await
    }

    async fn get_network_sm_devices(
        &self,
        network_id: &str,
        query: &SmDevicesQuery,
    ) -> Result<ApiResponse<Vec<SmDevice>>, ClientError> {
        self.get(
            ops::GET_NETWORK_SM_DEVICES,
            &format!("/networks/{}/sm/devices", segment(network_id)?),
            query.to_query(),
        )
        .await
    }

    async fn get_network_wireless_ssids(
        &self,
        network_id: &str,
    ) -> Result<ApiResponse<Vec<WirelessSsid>>, ClientError> {
        self.get(
            ops::GET_NETWORK_WIRELESS_SSIDS,
            &format!("/networks/{}/wireless/ssids", segment(network_id)?),
            Query::new(),
        )
        .await
    }

    async fn checkin_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesCheckinRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError> {
        self.post(
            ops::CHECKIN_NETWORK_SM_DEVICES,
            &format!("/networks/{}/sm/devices/checkin", segment(network_id)?),
            Some(request),
        )
        .await
    }

    async fn lock_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesLockRequest,
    ) -> Result<ApiResponse<SmDeviceIds>, ClientError> {
        self.post(
            ops::LOCK_NETWORK_SM_DEVICES,
            &format!("/networks/{}/sm/devices/lock", segment(network_id)?),
            Some(request),
        )
        .await
    }

    async fn modify_network_sm_devices_tags(
        &self,
        network_id: &str,
        request: &SmDevicesModifyTagsRequest,
    ) -> Result<ApiResponse<Vec<SmDeviceTags>>, ClientError> {
        self.post(
            ops::MODIFY_NETWORK_SM_DEVICES_TAGS,
            &format!("/networks/{}/sm/devices/modifyTags", segment(network_id)?),
            Some(request),
        )
        .await
    }

    async fn move_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDevicesMoveRequest,
    ) -> Result<ApiResponse<SmDevicesMoved>, ClientError> {
        self.post(
            ops::MOVE_NETWORK_SM_DEVICES,
            &format!("/networks/{}/sm/devices/move", segment(network_id)?),
            Some(request),
        )
        .await
    }

    async fn wipe_network_sm_devices(
        &self,
        network_id: &str,
        request: &SmDeviceWipeRequest,
    ) -> Result<ApiResponse<SmDeviceWiped>, ClientError> {
        self.post(
            ops::WIPE_NETWORK_SM_DEVICES,
            &format!("/networks/{}/sm/devices/wipe", segment(network_id)?),
            Some(request),
        )
        .await
    }

    async fn delete_network_switch_qos_rule(
        &self,
        network_id: &str,
        qos_rule_id: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let path = format!(
            "/networks/{}/switch/qosRules/{}",
            segment(network_id)?,
            segment(qos_rule_id)?
        );
        debug!(operation = ops::DELETE_NETWORK_SWITCH_QOS_RULE, path = %path, "DELETE");
        let request = self.request(Method::DELETE, &path);
        self.send_no_content(ops::DELETE_NETWORK_SWITCH_QOS_RULE, request)
            .await
    }

    async fn get_organizations(
        &self,
        query: &PageQuery,
    ) -> Result<ApiResponse<Vec<Organization>>, ClientError> {
        self.get(ops::GET_ORGANIZATIONS, "/organizations", query.to_query())
            .await
    }

    async fn get_organization(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<Organization>, ClientError> {
        self.get(
            ops::GET_ORGANIZATION,
            &format!("/organizations/{}", segment(organization_id)?),
            Query::new(),
        )
        .await
    }

    async fn get_organization_inventory_devices(
        &self,
        organization_id: &str,
        query: &InventoryDevicesQuery,
    ) -> Result<ApiResponse<Vec<InventoryDevice>>, ClientError> {
        self.get(
            ops::GET_ORGANIZATION_INVENTORY_DEVICES,
            &format!("/organizations/{}/inventory/devices", segment(organization_id)?),
            query.to_query(),
        )
        .await
    }

    async fn get_organization_appliance_security_intrusion(
        &self,
        organization_id: &str,
    ) -> Result<ApiResponse<SecurityIntrusion>, ClientError> {
        self.get(
            ops::GET_ORGANIZATION_APPLIANCE_SECURITY_INTRUSION,
            &format!(
                "/organizations/{}/appliance/security/intrusion",
                segment(organization_id)?
            ),
            Query::new(),
        )
        .await
    }

    async fn release_from_organization_inventory(
        &self,
        organization_id: &str,
        request: &InventoryReleaseRequest,
    ) -> Result<ApiResponse<InventoryRelease>, ClientError> {
        self.post(
            ops::RELEASE_FROM_ORGANIZATION_INVENTORY,
            &format!("/organizations/{}/inventory/release", segment(organization_id)?),
            Some(request),
        )
        .await
    }

    async fn recalculate_organization_wireless_radio_auto_rf_channels(
        &self,
        organization_id: &str,
        request: &AutoRfRecalculateRequest,
    ) -> Result<ApiResponse<AutoRfRecalculation>, ClientError> {
        self.post(
            ops::RECALCULATE_ORGANIZATION_WIRELESS_RADIO_AUTO_RF_CHANNELS,
            &format!(
                "/organizations/{}/wireless/radio/autoRf/channels/recalculate",
                segment(organization_id)?
            ),
            Some(request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_with_and_without_caller() {
        let mut options = ClientOptions::new("key");
        assert_eq!(
            options.user_agent(),
            format!("meraki-provider/{}", env!("CARGO_PKG_VERSION"))
        );

        options.caller = Some("AcmeCorp".to_string());
        assert!(options.user_agent().ends_with(" AcmeCorp"));

        options.caller = Some(String::new());
        assert!(!options.user_agent().contains(' '));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let mut options = ClientOptions::new("key");
        options.base_url = "https://api.meraki.com/api/v1/".to_string();
        let client = MerakiClient::new(options).unwrap();
        assert_eq!(client.base_url(), "https://api.meraki.com/api/v1");
    }

    #[test]
    fn test_new_rejects_unprintable_key() {
        assert!(matches!(
            MerakiClient::new(ClientOptions::new("bad\nkey")),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_decode_body_empty_variants() {
        assert_eq!(decode_body::<Device>(204, "").unwrap(), None);
        assert_eq!(decode_body::<Device>(200, "  ").unwrap(), None);
        assert_eq!(decode_body::<Device>(200, "null").unwrap(), None);

        let device = decode_body::<Device>(200, r#"{"serial":"Q2XX"}"#).unwrap().unwrap();
        assert_eq!(device.serial.as_deref(), Some("Q2XX"));

        assert!(matches!(
            decode_body::<Device>(200, "not json"),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_error_message_joins_errors_array() {
        assert_eq!(
            error_message(r#"{"errors":["Invalid serial","Not allowed"]}"#),
            "Invalid serial, Not allowed"
        );
        assert_eq!(error_message("Bad gateway\n"), "Bad gateway");
        assert_eq!(error_message(r#"{"errors":[]}"#), r#"{"errors":[]}"#);
    }

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back the raw request bytes.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .map(|v| v.trim().parse::<usize>().unwrap())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let mut response = format!("HTTP/1.1 {}\r\nconnection: close\r\n", status);
            if !status.starts_with("204") {
                response.push_str(&format!(
                    "content-type: application/json\r\ncontent-length: {}\r\n",
                    body.len()
                ));
            }
            response.push_str("\r\n");
            response.push_str(body);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/api/v1", addr), handle)
    }

    fn client(base_url: String) -> MerakiClient {
        let mut options = ClientOptions::new("key-123");
        options.base_url = base_url;
        options.caller = Some("AcmeCorp".to_string());
        MerakiClient::new(options).unwrap()
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_get_sends_headers_and_array_query() {
        let (base_url, server) = serve_once("200 OK", r#"[{"id":"dev1","name":"laptop"}]"#).await;
        let query = SmDevicesQuery {
            serials: vec!["Q2AA".to_string(), "Q2BB".to_string()],
            page: PageQuery {
                per_page: Some(10),
                ..Default::default()
            },
            ..Default::default()
        };

        let response = client(base_url).get_network_sm_devices("N_1", &query).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(
            request_line(&request),
            "GET /api/v1/networks/N_1/sm/devices?serials%5B%5D=Q2AA&serials%5B%5D=Q2BB&perPage=10 HTTP/1.1"
        );
        let headers = request.to_lowercase();
        assert!(headers.contains("authorization: bearer key-123\r\n"));
        assert!(headers.contains("accept: application/json\r\n"));
        assert!(headers.contains(&format!(
            "user-agent: meraki-provider/{} acmecorp\r\n",
            env!("CARGO_PKG_VERSION")
        )));

        assert_eq!(response.status, 200);
        let devices = response.data.unwrap();
        assert_eq!(devices[0].name.as_deref(), Some("laptop"));
    }

    #[tokio::test]
    async fn test_path_parameters_stay_one_segment() {
        let (base_url, server) = serve_once("200 OK", r#"{"serial":"x"}"#).await;
        client(base_url).get_device("Q2XX/../x").await.unwrap();
        let request = server.await.unwrap();
        assert_eq!(
            request_line(&request),
            "GET /api/v1/devices/Q2XX%2F..%2Fx HTTP/1.1"
        );

        let (base_url, server) = serve_once("200 OK", r#"{"serial":"x"}"#).await;
        client(base_url).get_device("Q2XX?perPage=3#frag").await.unwrap();
        let request = server.await.unwrap();
        assert_eq!(
            request_line(&request),
            "GET /api/v1/devices/Q2XX%3FperPage%3D3%23frag HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_dot_segments_rejected_before_sending() {
        let client = client("http://127.0.0.1:9/api/v1".to_string());
        for value in [".", ".."] {
            assert!(matches!(
                client.delete_network_switch_qos_rule("N_1", value).await,
                Err(ClientError::InvalidRequest(_))
            ));
        }
        assert!(matches!(
            client.get_device("..").await,
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let (base_url, server) =
            serve_once("202 Accepted", r#"{"duration":20,"period":160,"duty":50}"#).await;
        let request = BlinkLedsRequest {
            duration: Some(20),
            ..Default::default()
        };

        let response = client(base_url).blink_device_leds("Q2XX", &request).await.unwrap();
        let raw = server.await.unwrap();

        assert_eq!(request_line(&raw), "POST /api/v1/devices/Q2XX/blinkLeds HTTP/1.1");
        assert!(raw.to_lowercase().contains("content-type: application/json\r\n"));
        assert!(raw.ends_with(r#"{"duration":20}"#));
        assert_eq!(response.status, 202);
        assert_eq!(response.data.unwrap().period, Some(160));
    }

    #[tokio::test]
    async fn test_no_content_and_empty_bodies() {
        let (base_url, server) = serve_once("204 No Content", "").await;
        let response = client(base_url)
            .delete_network_switch_qos_rule("N_1", "rule-1")
            .await
            .unwrap();
        let request = server.await.unwrap();
        assert_eq!(
            request_line(&request),
            "DELETE /api/v1/networks/N_1/switch/qosRules/rule-1 HTTP/1.1"
        );
        assert_eq!(response.status, 204);
        assert!(response.data.is_none());

        let (base_url, server) = serve_once("200 OK", "").await;
        let response = client(base_url).get_network("N_1").await.unwrap();
        server.await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_error_status_joins_errors_array() {
        let (base_url, server) =
            serve_once("400 Bad Request", r#"{"errors":["Invalid serial","Not allowed"]}"#).await;
        let err = client(base_url).get_device("Q2XX").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            ClientError::Api { status: 400, ref message } if message == "Invalid serial, Not allowed"
        ));

        let (base_url, server) = serve_once("429 Too Many Requests", r#"{"errors":["slow down"]}"#).await;
        let err = client(base_url).reboot_device("Q2XX").await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, ClientError::RateLimited(ref m) if m == "slow down"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("Q2XX-XXXX").unwrap(), "Q2XX-XXXX");
        assert_eq!(segment("L_123~a.b").unwrap(), "L_123~a.b");
        assert_eq!(segment("a/b").unwrap(), "a%2Fb");
        assert!(segment("").is_err());
        assert!(segment("..").is_err());
    }
}
