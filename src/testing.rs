//! Testing utilities for the provider.
//!
//! [`ProviderTester`] drives a [`ProviderService`] without a gRPC server, and
//! the assertion helpers check diagnostics and state shapes.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use meraki_provider::client::{ops, MockDashboardApi};
//! use meraki_provider::testing::ProviderTester;
//! use meraki_provider::MerakiProvider;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn reads_a_device() {
//!     let mock = MockDashboardApi::new()
//!         .with_response(ops::GET_DEVICE, json!({"serial": "Q2XX-XXXX"}));
//!     let tester = ProviderTester::new(MerakiProvider::with_client(Arc::new(mock)));
//!
//!     let state = tester
//!         .read_data_source("meraki_devices", json!({"serial": "Q2XX-XXXX"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(state["item"]["serial"], "Q2XX-XXXX");
//! }
//! ```

use serde_json::Value;

use crate::error::ProviderError;
use crate::schema::{
    AttributeType, Block, BlockNestingMode, Diagnostic, DiagnosticSeverity, ProviderSchema, Schema,
};
use crate::server::ProviderService;
use crate::types::{ImportedResource, PlanResult};

/// A test harness for provider implementations.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Create a new tester for the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// Get the provider's schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Schema of one resource type.
    pub fn resource_schema(&self, resource_type: &str) -> Option<Schema> {
        self.provider.schema().resources.remove(resource_type)
    }

    /// Schema of one data source type.
    pub fn data_source_schema(&self, data_source_type: &str) -> Option<Schema> {
        self.provider.schema().data_sources.remove(data_source_type)
    }

    /// Get the list of resource type names.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    /// Get the list of data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Validate provider configuration; `Err` carries the error diagnostics.
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.validate_provider_config(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Configure the provider; `Err` carries the error diagnostics.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.configure(config).await?;
        check_diagnostics(diagnostics)
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate a resource configuration.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_resource_config(resource_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Plan a resource creation (no prior state).
    pub async fn plan_create(
        &self,
        resource_type: &str,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, None, proposed_state.clone(), proposed_state)
            .await
    }

    /// Plan a change against existing state.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        proposed_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), proposed_state.clone(), proposed_state)
            .await
    }

    /// Plan a resource deletion.
    pub async fn plan_delete(
        &self,
        resource_type: &str,
        prior_state: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior_state), Value::Null, Value::Null)
            .await
    }

    /// Create a resource and return its state, failing on error diagnostics.
    pub async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let result = self.provider.create(resource_type, planned_state).await?;
        Ok(result.state)
    }

    /// Read a resource and return its state.
    pub async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let result = self.provider.read(resource_type, current_state).await?;
        Ok(result.state)
    }

    /// Update a resource and return its state.
    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let result = self
            .provider
            .update(resource_type, prior_state, planned_state)
            .await?;
        Ok(result.state)
    }

    /// Delete a resource.
    pub async fn delete(&self, resource_type: &str, current_state: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    /// Import an existing resource.
    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Validate a data source configuration.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(data_source_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Read data from a data source.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .read_data_source(data_source_type, config)
            .await
    }

    // =========================================================================
    // Lifecycle Helpers
    // =========================================================================

    /// Plan then create; returns the created state.
    pub async fn lifecycle_create(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self.plan_create(resource_type, config).await?;
        self.create(resource_type, plan.planned_state).await
    }

    /// Plan a destroy then delete.
    pub async fn lifecycle_delete(
        &self,
        resource_type: &str,
        current_state: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        self.plan_delete(resource_type, current_state.clone()).await?;
        self.delete(resource_type, current_state).await
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a provider error.
    Provider(ProviderError),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(|d| d.is_error()).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// Assert that no diagnostic is an error.
///
/// # Panics
///
/// Panics listing the error summaries otherwise.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(|d| &d.summary)
        .collect();
    assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
}

/// Assert that some error diagnostic's summary contains `substring`.
///
/// # Panics
///
/// Panics if no error diagnostic matches.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    assert!(
        diagnostics
            .iter()
            .any(|d| d.is_error() && d.summary.contains(substring)),
        "Expected an error containing '{}', got: {:?}",
        substring,
        diagnostics.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that some warning diagnostic's summary contains `substring`.
///
/// # Panics
///
/// Panics if no warning matches.
pub fn assert_has_warning(diagnostics: &[Diagnostic], substring: &str) {
    assert!(
        diagnostics.iter().any(|d| {
            matches!(d.severity, DiagnosticSeverity::Warning) && d.summary.contains(substring)
        }),
        "Expected a warning containing '{}', got: {:?}",
        substring,
        diagnostics.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that `plan` replaces the resource.
///
/// # Panics
///
/// Panics if the plan has no changes or updates in place.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(!plan.changes.is_empty(), "Expected changes, but plan has none");
    assert!(plan.requires_replace, "Expected a replacement plan");
}

/// Assert that `state` has exactly the shape `schema` declares.
///
/// Every declared attribute and block must be present (possibly `null`) and
/// no undeclared key may appear, at any depth. Scalar values are type-checked.
///
/// # Panics
///
/// Panics with the path of every mismatch.
pub fn assert_state_matches_schema(schema: &Schema, state: &Value) {
    let mut problems = Vec::new();
    check_block(&schema.block, state, "", &mut problems);
    assert!(
        problems.is_empty(),
        "State does not match schema:\n  {}",
        problems.join("\n  ")
    );
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn check_block(block: &Block, value: &Value, path: &str, problems: &mut Vec<String>) {
    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            problems.push(format!("{}: expected object, got {}", path, other));
            return;
        },
    };

    for key in obj.keys() {
        if !block.attributes.contains_key(key) && !block.blocks.contains_key(key) {
            problems.push(format!("{}: undeclared key", join(path, key)));
        }
    }

    for (name, attr) in &block.attributes {
        let attr_path = join(path, name);
        match obj.get(name) {
            None => problems.push(format!("{}: missing", attr_path)),
            Some(v) => check_type(&attr.attr_type, v, &attr_path, problems),
        }
    }

    for (name, nested) in &block.blocks {
        let block_path = join(path, name);
        match obj.get(name) {
            None => problems.push(format!("{}: missing", block_path)),
            Some(Value::Null) => {},
            Some(v) => match nested.nesting_mode {
                BlockNestingMode::Single => check_block(&nested.block, v, &block_path, problems),
                BlockNestingMode::List | BlockNestingMode::Set => match v.as_array() {
                    Some(items) => {
                        for (i, item) in items.iter().enumerate() {
                            check_block(&nested.block, item, &format!("{}.{}", block_path, i), problems);
                        }
                    },
                    None => problems.push(format!("{}: expected list", block_path)),
                },
                BlockNestingMode::Map => match v.as_object() {
                    Some(items) => {
                        for (k, item) in items {
                            check_block(&nested.block, item, &join(&block_path, k), problems);
                        }
                    },
                    None => problems.push(format!("{}: expected map", block_path)),
                },
            },
        }
    }
}

fn check_type(attr_type: &AttributeType, value: &Value, path: &str, problems: &mut Vec<String>) {
    let ok = match (attr_type, value) {
        (_, Value::Null) => true,
        (AttributeType::String, v) => v.is_string(),
        (AttributeType::Int64, v) => v.is_i64() || v.is_u64(),
        (AttributeType::Float64, v) => v.is_number(),
        (AttributeType::Bool, v) => v.is_boolean(),
        (AttributeType::List(element) | AttributeType::Set(element), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_type(element, item, &format!("{}.{}", path, i), problems);
            }
            true
        },
        (AttributeType::Map(element), Value::Object(items)) => {
            for (k, item) in items {
                check_type(element, item, &join(path, k), problems);
            }
            true
        },
        (AttributeType::Object(fields), Value::Object(items)) => {
            for key in items.keys().filter(|k| !fields.contains_key(*k)) {
                problems.push(format!("{}: undeclared key", join(path, key)));
            }
            for (name, field_type) in fields {
                match items.get(name) {
                    None => problems.push(format!("{}: missing", join(path, name))),
                    Some(v) => check_type(field_type, v, &join(path, name), problems),
                }
            }
            true
        },
        _ => false,
    };
    if !ok {
        problems.push(format!("{}: expected {:?}, got {}", path, attr_type, value));
    }
}
