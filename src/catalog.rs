//! Adapter traits and the registry of every data source and resource.
//!
//! Adapters are stateless: they receive the Dashboard client per call and
//! exchange JSON with the provider. Each one decodes its typed config,
//! makes exactly one Dashboard call and encodes its typed state.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::client::{ApiResponse, ClientError, DashboardApi};
use crate::data_sources;
use crate::error::ProviderError;
use crate::resources;
use crate::schema::{Diagnostic, Schema};

/// Prefix of every type name exposed by this provider.
pub const PROVIDER_PREFIX: &str = "meraki";

/// Full type name for an adapter suffix, e.g. `meraki_devices`.
pub fn full_type_name(suffix: &str) -> String {
    format!("{}_{}", PROVIDER_PREFIX, suffix)
}

/// A read-only Dashboard query.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Type name without the provider prefix.
    fn type_name(&self) -> &'static str;

    /// Config attributes plus the computed `item` / `items`.
    fn schema(&self) -> Schema;

    /// Run the query. `config` has already passed schema validation.
    async fn read(&self, client: &dyn DashboardApi, config: Value) -> Result<Value, ProviderError>;
}

/// What a no-op Read reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadBehavior {
    /// Return the state unchanged.
    #[default]
    Silent,
    /// Return the state unchanged with a warning that nothing was refreshed.
    Warn,
}

/// A one-shot Dashboard action modeled as a create-only resource.
///
/// Only `create` talks to the API. Read, update and delete are handled by
/// the provider as local bookkeeping.
#[async_trait::async_trait]
pub trait ActionResource: Send + Sync {
    /// Type name without the provider prefix.
    fn type_name(&self) -> &'static str;

    /// Path parameters, the `parameters` block and the computed result.
    fn schema(&self) -> Schema;

    /// How Read reports on this action.
    fn read_behavior(&self) -> ReadBehavior {
        ReadBehavior::Silent
    }

    /// Perform the action and return the state to persist.
    async fn create(&self, client: &dyn DashboardApi, planned: Value)
        -> Result<Value, ProviderError>;
}

/// Decode a typed config or plan.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|e| {
        ProviderError::Diagnostics(vec![
            Diagnostic::error("Invalid configuration").with_detail(e.to_string())
        ])
    })
}

/// Encode a typed state.
pub fn encode<T: Serialize>(state: &T) -> Result<Value, ProviderError> {
    Ok(serde_json::to_value(state)?)
}

/// Unwrap a Dashboard call: errors and bodiless answers become a call
/// failure naming `operation`.
pub fn require_data<T>(
    operation: &str,
    result: Result<ApiResponse<T>, ClientError>,
) -> Result<T, ProviderError> {
    match result {
        Ok(ApiResponse { data: Some(data), .. }) => Ok(data),
        Ok(ApiResponse { status, data: None }) => {
            error!(operation, status, "Dashboard call returned no body");
            Err(ProviderError::empty_response(operation))
        },
        Err(e) => {
            error!(operation, error = %e, "Dashboard call failed");
            Err(ProviderError::from_client(operation, e))
        },
    }
}

/// Like [`require_data`] for endpoints that answer `204 No Content`.
pub fn require_success<T>(
    operation: &str,
    result: Result<ApiResponse<T>, ClientError>,
) -> Result<(), ProviderError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(operation, error = %e, "Dashboard call failed");
            Err(ProviderError::from_client(operation, e))
        },
    }
}

/// Every adapter, keyed by full type name.
pub struct Catalog {
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
    resources: BTreeMap<String, Box<dyn ActionResource>>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            data_sources: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    /// The catalog shipped with the provider.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for data_source in data_sources::all() {
            catalog.register_data_source(data_source);
        }
        for resource in resources::all() {
            catalog.register_resource(resource);
        }
        catalog
    }

    /// Add a data source under its full type name.
    pub fn register_data_source(&mut self, data_source: Box<dyn DataSource>) {
        self.data_sources
            .insert(full_type_name(data_source.type_name()), data_source);
    }

    /// Add a resource under its full type name.
    pub fn register_resource(&mut self, resource: Box<dyn ActionResource>) {
        self.resources
            .insert(full_type_name(resource.type_name()), resource);
    }

    /// Look up a data source by full type name.
    pub fn data_source(&self, type_name: &str) -> Result<&dyn DataSource, ProviderError> {
        self.data_sources
            .get(type_name)
            .map(|d| d.as_ref())
            .ok_or_else(|| ProviderError::UnknownDataSource(type_name.to_string()))
    }

    /// Look up a resource by full type name.
    pub fn resource(&self, type_name: &str) -> Result<&dyn ActionResource, ProviderError> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Data sources in name order.
    pub fn data_sources(&self) -> impl Iterator<Item = (&str, &dyn DataSource)> {
        self.data_sources.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Resources in name order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &dyn ActionResource)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ops;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.data_sources().count(), 13);
        assert_eq!(catalog.resources().count(), 12);

        assert!(catalog.data_source("meraki_devices").is_ok());
        assert!(catalog
            .resource("meraki_organizations_wireless_radio_auto_rf_channels_recalculate")
            .is_ok());

        let names: Vec<&str> = catalog
            .data_sources()
            .map(|(name, _)| name)
            .chain(catalog.resources().map(|(name, _)| name))
            .collect();
        assert!(names.iter().all(|name| name.starts_with("meraki_")));
    }

    #[test]
    fn test_unknown_types() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.data_source("meraki_nope"),
            Err(ProviderError::UnknownDataSource(_))
        ));
        assert!(matches!(
            catalog.resource("devices_reboot"),
            Err(ProviderError::UnknownResource(_))
        ));
    }

    #[test]
    fn test_require_data_maps_failures() {
        let ok: Result<ApiResponse<u8>, ClientError> = Ok(ApiResponse::ok(7));
        assert_eq!(require_data(ops::GET_DEVICE, ok).unwrap(), 7);

        let empty: Result<ApiResponse<u8>, ClientError> = Ok(ApiResponse::empty(200));
        let err = require_data(ops::GET_DEVICE, empty).unwrap_err();
        assert!(matches!(err, ProviderError::Api { ref operation, .. } if operation == "GetDevice"));

        let failed: Result<ApiResponse<u8>, ClientError> =
            Err(ClientError::from_status(500, "boom".into()));
        let diagnostics = require_data(ops::GET_DEVICE, failed).unwrap_err().to_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_require_success_accepts_no_content() {
        let no_content: Result<ApiResponse<()>, ClientError> = Ok(ApiResponse::empty(204));
        assert!(require_success(ops::DELETE_NETWORK_SWITCH_QOS_RULE, no_content).is_ok());
    }

    #[test]
    fn test_decode_reports_diagnostics() {
        #[derive(serde::Deserialize, Debug)]
        struct Config {
            #[allow(dead_code)]
            serial: String,
        }
        let err = decode::<Config>(serde_json::json!({"serial": 5})).unwrap_err();
        assert!(matches!(err, ProviderError::Diagnostics(ref d) if d.len() == 1));
    }
}
