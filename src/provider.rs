//! The Meraki provider root.
//!
//! Owns the adapter [`Catalog`] and the Dashboard client. The client is set
//! exactly once, by `Configure` (or [`MerakiProvider::with_client`] in tests),
//! and lent read-only to every adapter call after that.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::catalog::{ActionResource, Catalog, ReadBehavior};
use crate::client::{DashboardApi, MerakiClient};
use crate::config::{self, ProviderConfig};
use crate::error::ProviderError;
use crate::schema::{has_errors, Diagnostic, ProviderSchema, Schema};
use crate::server::ProviderService;
use crate::types::{AttributeChange, PlanResult, ResourceState};
use crate::validation::validate;

/// Provider for the Meraki Dashboard API.
pub struct MerakiProvider {
    catalog: Catalog,
    client: OnceLock<Arc<dyn DashboardApi>>,
}

impl MerakiProvider {
    /// An unconfigured provider with the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
            client: OnceLock::new(),
        }
    }

    /// A provider already bound to `client`; `Configure` becomes a no-op.
    pub fn with_client(client: Arc<dyn DashboardApi>) -> Self {
        let provider = Self::new();
        let _ = provider.client.set(client);
        provider
    }

    /// The adapter catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a client is bound.
    pub fn is_configured(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> Result<&dyn DashboardApi, ProviderError> {
        self.client
            .get()
            .map(|c| c.as_ref())
            .ok_or(ProviderError::NotConfigured)
    }

    fn resource_schema(&self, resource_type: &str) -> Result<(&dyn ActionResource, Schema), ProviderError> {
        let resource = self.catalog.resource(resource_type)?;
        Ok((resource, resource.schema()))
    }
}

impl Default for MerakiProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn check(schema: &Schema, value: &Value) -> Result<(), ProviderError> {
    let diagnostics = validate(schema, value);
    if has_errors(&diagnostics) {
        Err(ProviderError::Diagnostics(diagnostics))
    } else {
        Ok(())
    }
}

/// Names of the top-level keys the provider computes.
fn computed_keys(schema: &Schema) -> Vec<&str> {
    let block = &schema.block;
    block
        .attributes
        .iter()
        .filter(|(_, a)| !a.flags.is_configurable())
        .map(|(k, _)| k.as_str())
        .chain(
            block
                .blocks
                .iter()
                .filter(|(_, b)| b.block.is_computed())
                .map(|(k, _)| k.as_str()),
        )
        .collect()
}

/// Top-level keys the user configures, with their replace flag.
fn configurable_keys(schema: &Schema) -> Vec<(&str, bool)> {
    let block = &schema.block;
    block
        .attributes
        .iter()
        .filter(|(_, a)| a.flags.is_configurable())
        .map(|(k, a)| (k.as_str(), a.requires_replace))
        .chain(
            block
                .blocks
                .iter()
                .filter(|(_, b)| !b.block.is_computed())
                .map(|(k, b)| (k.as_str(), b.requires_replace)),
        )
        .collect()
}

fn present<'a>(state: &'a Value, key: &str) -> Option<&'a Value> {
    state.get(key).filter(|v| !v.is_null())
}

/// Plan an action resource from its schema alone.
///
/// Creation plans every computed value as `null`. Any change to a
/// `requires_replace` key forces replacement; other changes are planned in
/// place and keep the prior computed values.
pub fn plan_action(schema: &Schema, prior: Option<&Value>, proposed: Value) -> PlanResult {
    if proposed.is_null() {
        let changes = prior
            .and_then(Value::as_object)
            .map(|obj| {
                obj.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| AttributeChange::between(k.clone(), Some(v), None))
                    .collect()
            })
            .unwrap_or_default();
        return PlanResult::with_changes(Value::Null, changes, false);
    }

    let mut planned = match proposed {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let planned_value = |planned: &Map<String, Value>, key: &str| {
        planned.get(key).filter(|v| !v.is_null()).cloned()
    };

    let mut changes = Vec::new();
    let mut requires_replace = false;
    for (key, replaces) in configurable_keys(schema) {
        let before = prior.and_then(|p| present(p, key));
        let after = planned_value(&planned, key);
        if before != after.as_ref() {
            changes.push(AttributeChange::between(key, before, after.as_ref()));
            requires_replace |= prior.is_some() && replaces;
        }
    }

    for key in computed_keys(schema) {
        let value = match prior {
            Some(prior) if !requires_replace => prior.get(key).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        };
        planned.insert(key.to_string(), value);
    }

    let planned = Value::Object(planned);
    if changes.is_empty() {
        PlanResult::no_change(planned)
    } else {
        PlanResult::with_changes(planned, changes, requires_replace)
    }
}

#[async_trait::async_trait]
impl ProviderService for MerakiProvider {
    fn schema(&self) -> ProviderSchema {
        let mut schema = ProviderSchema::new().with_provider_config(config::schema());
        for (name, data_source) in self.catalog.data_sources() {
            schema = schema.with_data_source(name, data_source.schema());
        }
        for (name, resource) in self.catalog.resources() {
            schema = schema.with_resource(name, resource.schema());
        }
        schema
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(match ProviderConfig::resolve(&config) {
            Ok(_) => vec![],
            Err(diagnostics) => diagnostics,
        })
    }

    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        if self.is_configured() {
            warn!("Provider already configured, keeping the existing client");
            return Ok(vec![Diagnostic::warning("Provider already configured")
                .with_detail("The Dashboard client is created once; the new configuration was ignored")]);
        }

        let settings = match ProviderConfig::resolve(&config) {
            Ok(settings) => settings,
            Err(diagnostics) => return Ok(diagnostics),
        };
        debug!(config = ?settings, "Resolved provider configuration");

        let client = MerakiClient::new(settings.client_options())
            .map_err(|e| ProviderError::Configuration(e.to_string()))?;
        if self.client.set(Arc::new(client)).is_err() {
            // Lost a race with a concurrent Configure.
            return Ok(vec![Diagnostic::warning("Provider already configured")]);
        }

        info!(base_url = %settings.base_url, "Dashboard client configured");
        Ok(vec![])
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let (_, schema) = self.resource_schema(resource_type)?;
        Ok(validate(&schema, &config))
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        _config: Value,
    ) -> Result<PlanResult, ProviderError> {
        let (_, schema) = self.resource_schema(resource_type)?;
        Ok(plan_action(&schema, prior_state.as_ref(), proposed_state))
    }

    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<ResourceState, ProviderError> {
        let (resource, schema) = self.resource_schema(resource_type)?;
        check(&schema, &planned_state)?;
        let client = self.client()?;
        let state = resource.create(client, planned_state).await?;
        Ok(ResourceState::new(state))
    }

    async fn read(&self, resource_type: &str, current_state: Value) -> Result<ResourceState, ProviderError> {
        let (resource, _) = self.resource_schema(resource_type)?;
        let state = ResourceState::new(current_state);
        Ok(match resource.read_behavior() {
            ReadBehavior::Silent => state,
            ReadBehavior::Warn => state.with_diagnostic(
                Diagnostic::warning(format!("Read is not supported for {}", resource_type))
                    .with_detail("The Dashboard API has no read endpoint for this action; the stored state is kept as-is"),
            ),
        })
    }

    async fn update(
        &self,
        resource_type: &str,
        _prior_state: Value,
        planned_state: Value,
    ) -> Result<ResourceState, ProviderError> {
        self.resource_schema(resource_type)?;
        warn!(resource_type, "Update requested for an action resource");
        Ok(ResourceState::new(planned_state).with_diagnostic(
            Diagnostic::warning(format!("Update is not supported for {}", resource_type))
                .with_detail("The action runs only on create; the planned state was stored without calling the Dashboard API"),
        ))
    }

    async fn delete(&self, resource_type: &str, _current_state: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        self.resource_schema(resource_type)?;
        debug!(resource_type, "Removing local state only");
        Ok(vec![])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let data_source = self.catalog.data_source(data_source_type)?;
        Ok(validate(&data_source.schema(), &config))
    }

    async fn read_data_source(&self, data_source_type: &str, config: Value) -> Result<Value, ProviderError> {
        let data_source = self.catalog.data_source(data_source_type)?;
        check(&data_source.schema(), &config)?;
        let client = self.client()?;
        data_source.read(client, config).await
    }
}
