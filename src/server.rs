//! gRPC server for the provider protocol.
//!
//! [`ProviderService`] is the Rust-typed view of the protocol; the private
//! `ProviderGrpcService` adapts it to the generated tonic trait, moving JSON
//! byte buffers in and out and turning errors into diagnostics.
//!
//! # Signal Handling
//!
//! The server handles SIGTERM and SIGINT. On a signal it stops accepting
//! connections, waits at most [`ServeOptions::shutdown_timeout`] for in-flight
//! requests, calls the provider's `stop()` and returns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tonic::transport::Server;
use tracing::{debug, error, info, instrument, warn};

use crate::error::ProviderError;
use crate::generated;
use crate::schema::{has_errors, BlockNestingMode, Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::types::{
    ImportedResource, PlanResult, ProviderMetadata, ResourceState, HANDSHAKE_PREFIX,
    PROTOCOL_VERSION,
};

/// Provider-side view of the protocol.
///
/// Configs and states are plain [`serde_json::Value`]s. Returning `Err`
/// aborts the RPC: the host receives the error's diagnostics and no state.
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    // =========================================================================
    // Schema & Metadata
    // =========================================================================

    /// The provider configuration, resource and data source schemas.
    fn schema(&self) -> ProviderSchema;

    /// Resource and data source names, derived from the schema by default.
    fn metadata(&self) -> ProviderMetadata {
        let schema = self.schema();
        ProviderMetadata {
            resources: schema.resources.keys().cloned().collect(),
            data_sources: schema.data_sources.keys().cloned().collect(),
            capabilities: Default::default(),
        }
    }

    // =========================================================================
    // Provider Lifecycle
    // =========================================================================

    /// Check the provider configuration without applying it.
    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = config;
        Ok(vec![])
    }

    /// Apply the provider configuration.
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Release resources before exit.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Check a resource configuration before planning.
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (resource_type, config);
        Ok(vec![])
    }

    /// Migrate state written by an older schema version.
    async fn upgrade_resource_state(
        &self,
        resource_type: &str,
        version: i64,
        state: Value,
    ) -> Result<Value, ProviderError> {
        let _ = (resource_type, version);
        Ok(state)
    }

    /// Compute the planned state for a resource.
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError>;

    /// Create a resource from its planned state.
    async fn create(&self, resource_type: &str, planned_state: Value)
        -> Result<ResourceState, ProviderError>;

    /// Refresh a resource's state.
    async fn read(&self, resource_type: &str, current_state: Value)
        -> Result<ResourceState, ProviderError>;

    /// Apply an in-place change.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<ResourceState, ProviderError>;

    /// Remove a resource; returns non-fatal diagnostics.
    async fn delete(&self, resource_type: &str, current_state: Value)
        -> Result<Vec<Diagnostic>, ProviderError>;

    /// Import existing infrastructure.
    async fn import_resource(
        &self,
        resource_type: &str,
        _id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        Err(ProviderError::Unimplemented(format!(
            "Import not supported for resource type: {}",
            resource_type
        )))
    }

    // =========================================================================
    // Data Source Operations
    // =========================================================================

    /// Check a data source configuration.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (data_source_type, config);
        Ok(vec![])
    }

    /// Read a data source.
    async fn read_data_source(&self, data_source_type: &str, config: Value)
        -> Result<Value, ProviderError>;
}

/// Wrapper that implements the generated gRPC trait.
struct ProviderGrpcService<P: ProviderService> {
    provider: Arc<P>,
}

fn decode(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn encode(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

fn diagnostics_to_proto(diagnostics: Vec<Diagnostic>) -> Vec<generated::Diagnostic> {
    diagnostics
        .into_iter()
        .map(|d| generated::Diagnostic {
            severity: match d.severity {
                DiagnosticSeverity::Error => generated::diagnostic::Severity::Error as i32,
                DiagnosticSeverity::Warning => generated::diagnostic::Severity::Warning as i32,
            },
            summary: d.summary,
            detail: d.detail.unwrap_or_default(),
            attribute: d.attribute.unwrap_or_default(),
        })
        .collect()
}

fn error_to_proto(err: &ProviderError) -> Vec<generated::Diagnostic> {
    diagnostics_to_proto(err.to_diagnostics())
}

fn schema_to_proto(schema: &crate::schema::Schema) -> generated::Schema {
    generated::Schema {
        version: schema.version as i64,
        block: Some(block_to_proto(&schema.block)),
    }
}

fn block_to_proto(block: &crate::schema::Block) -> generated::Block {
    generated::Block {
        attributes: block
            .attributes
            .iter()
            .map(|(name, attr)| generated::Attribute {
                name: name.clone(),
                r#type: serde_json::to_vec(&attr.attr_type).unwrap_or_default(),
                required: attr.flags.required,
                optional: attr.flags.optional,
                computed: attr.flags.computed,
                sensitive: attr.flags.sensitive,
                description: attr.description.clone().unwrap_or_default(),
                requires_replace: attr.requires_replace,
                default_value: Vec::new(),
            })
            .collect(),
        block_types: block
            .blocks
            .iter()
            .map(|(name, nested)| generated::NestedBlock {
                type_name: name.clone(),
                block: Some(block_to_proto(&nested.block)),
                nesting_mode: match nested.nesting_mode {
                    BlockNestingMode::Single => generated::nested_block::NestingMode::Single as i32,
                    BlockNestingMode::List => generated::nested_block::NestingMode::List as i32,
                    BlockNestingMode::Set => generated::nested_block::NestingMode::Set as i32,
                    BlockNestingMode::Map => generated::nested_block::NestingMode::Map as i32,
                },
                min_items: nested.min_items as i32,
                max_items: nested.max_items as i32,
                requires_replace: nested.requires_replace,
            })
            .collect(),
        description: block.description.clone().unwrap_or_default(),
    }
}

fn log_validation(kind: &str, type_name: &str, diagnostics: &[Diagnostic]) {
    if has_errors(diagnostics) {
        warn!(type_name, diagnostics = diagnostics.len(), "{} completed with errors", kind);
    } else {
        info!(type_name, "{} completed successfully", kind);
    }
}

#[tonic::async_trait]
impl<P: ProviderService> generated::provider_server::Provider for ProviderGrpcService<P> {
    #[instrument(skip(self, _request), name = "grpc.get_metadata")]
    async fn get_metadata(
        &self,
        _request: tonic::Request<generated::GetMetadataRequest>,
    ) -> Result<tonic::Response<generated::GetMetadataResponse>, tonic::Status> {
        let metadata = self.provider.metadata();
        info!(
            resources = metadata.resources.len(),
            data_sources = metadata.data_sources.len(),
            "GetMetadata completed"
        );
        Ok(tonic::Response::new(generated::GetMetadataResponse {
            server_capabilities: Some(generated::ServerCapabilities {
                plan_destroy: metadata.capabilities.plan_destroy,
            }),
            resources: metadata.resources,
            data_sources: metadata.data_sources,
            diagnostics: vec![],
        }))
    }

    #[instrument(skip(self, _request), name = "grpc.get_schema")]
    async fn get_schema(
        &self,
        _request: tonic::Request<generated::GetSchemaRequest>,
    ) -> Result<tonic::Response<generated::GetSchemaResponse>, tonic::Status> {
        let schema = self.provider.schema();
        info!(
            resources = schema.resources.len(),
            data_sources = schema.data_sources.len(),
            "GetSchema completed"
        );
        Ok(tonic::Response::new(generated::GetSchemaResponse {
            provider: Some(schema_to_proto(&schema.provider)),
            resources: schema
                .resources
                .iter()
                .map(|(k, v)| (k.clone(), schema_to_proto(v)))
                .collect(),
            data_sources: schema
                .data_sources
                .iter()
                .map(|(k, v)| (k.clone(), schema_to_proto(v)))
                .collect(),
            diagnostics: vec![],
        }))
    }

    #[instrument(skip(self, request), name = "grpc.validate_provider_config")]
    async fn validate_provider_config(
        &self,
        request: tonic::Request<generated::ValidateProviderConfigRequest>,
    ) -> Result<tonic::Response<generated::ValidateProviderConfigResponse>, tonic::Status> {
        let config = decode(&request.into_inner().config);
        let diagnostics = match self.provider.validate_provider_config(config).await {
            Ok(diagnostics) => {
                log_validation("ValidateProviderConfig", "provider", &diagnostics);
                diagnostics_to_proto(diagnostics)
            },
            Err(e) => {
                error!(error = %e, "ValidateProviderConfig failed");
                error_to_proto(&e)
            },
        };
        Ok(tonic::Response::new(generated::ValidateProviderConfigResponse { diagnostics }))
    }

    #[instrument(skip(self, request), name = "grpc.configure")]
    async fn configure(
        &self,
        request: tonic::Request<generated::ConfigureRequest>,
    ) -> Result<tonic::Response<generated::ConfigureResponse>, tonic::Status> {
        let config = decode(&request.into_inner().config);
        let diagnostics = match self.provider.configure(config).await {
            Ok(diagnostics) => {
                if has_errors(&diagnostics) {
                    warn!(diagnostics = diagnostics.len(), "Configure completed with errors");
                } else {
                    info!("Configure completed successfully");
                }
                diagnostics_to_proto(diagnostics)
            },
            Err(e) => {
                error!(error = %e, "Configure failed");
                error_to_proto(&e)
            },
        };
        Ok(tonic::Response::new(generated::ConfigureResponse { diagnostics }))
    }

    #[instrument(skip(self, _request), name = "grpc.stop")]
    async fn stop(
        &self,
        _request: tonic::Request<generated::StopRequest>,
    ) -> Result<tonic::Response<generated::StopResponse>, tonic::Status> {
        info!("Stop called");
        let error = match self.provider.stop().await {
            Ok(()) => String::new(),
            Err(e) => {
                error!(error = %e, "Stop failed");
                e.to_string()
            },
        };
        Ok(tonic::Response::new(generated::StopResponse { error }))
    }

    #[instrument(skip(self, request), name = "grpc.validate_resource_config")]
    async fn validate_resource_config(
        &self,
        request: tonic::Request<generated::ValidateResourceConfigRequest>,
    ) -> Result<tonic::Response<generated::ValidateResourceConfigResponse>, tonic::Status> {
        let req = request.into_inner();
        debug!(resource_type = %req.resource_type, "ValidateResourceConfig called");
        let diagnostics = match self
            .provider
            .validate_resource_config(&req.resource_type, decode(&req.config))
            .await
        {
            Ok(diagnostics) => {
                log_validation("ValidateResourceConfig", &req.resource_type, &diagnostics);
                diagnostics_to_proto(diagnostics)
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "ValidateResourceConfig failed");
                error_to_proto(&e)
            },
        };
        Ok(tonic::Response::new(generated::ValidateResourceConfigResponse { diagnostics }))
    }

    #[instrument(skip(self, request), name = "grpc.upgrade_resource_state")]
    async fn upgrade_resource_state(
        &self,
        request: tonic::Request<generated::UpgradeResourceStateRequest>,
    ) -> Result<tonic::Response<generated::UpgradeResourceStateResponse>, tonic::Status> {
        let req = request.into_inner();
        debug!(resource_type = %req.resource_type, version = req.version, "UpgradeResourceState called");

        let response = match self
            .provider
            .upgrade_resource_state(&req.resource_type, req.version, decode(&req.raw_state))
            .await
        {
            Ok(upgraded) => generated::UpgradeResourceStateResponse {
                upgraded_state: encode(&upgraded),
                diagnostics: vec![],
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "UpgradeResourceState failed");
                generated::UpgradeResourceStateResponse {
                    upgraded_state: vec![],
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.plan")]
    async fn plan(
        &self,
        request: tonic::Request<generated::PlanRequest>,
    ) -> Result<tonic::Response<generated::PlanResponse>, tonic::Status> {
        let req = request.into_inner();
        let prior_state = if req.prior_state.is_empty() {
            None
        } else {
            serde_json::from_slice(&req.prior_state).ok()
        };
        debug!(resource_type = %req.resource_type, is_create = prior_state.is_none(), "Plan called");

        let response = match self
            .provider
            .plan(
                &req.resource_type,
                prior_state,
                decode(&req.proposed_state),
                decode(&req.config),
            )
            .await
        {
            Ok(result) => {
                info!(
                    resource_type = %req.resource_type,
                    changes = result.changes.len(),
                    requires_replace = result.requires_replace,
                    "Plan completed"
                );
                generated::PlanResponse {
                    planned_state: encode(&result.planned_state),
                    changes: result.changes.into_iter().map(Into::into).collect(),
                    requires_replace: result.requires_replace,
                    diagnostics: vec![],
                }
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "Plan failed");
                generated::PlanResponse {
                    planned_state: vec![],
                    changes: vec![],
                    requires_replace: false,
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.create")]
    async fn create(
        &self,
        request: tonic::Request<generated::CreateRequest>,
    ) -> Result<tonic::Response<generated::CreateResponse>, tonic::Status> {
        let req = request.into_inner();
        info!(resource_type = %req.resource_type, "Create called");

        let response = match self
            .provider
            .create(&req.resource_type, decode(&req.planned_state))
            .await
        {
            Ok(result) => {
                info!(resource_type = %req.resource_type, "Create completed successfully");
                generated::CreateResponse {
                    state: encode(&result.state),
                    diagnostics: diagnostics_to_proto(result.diagnostics),
                }
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "Create failed");
                generated::CreateResponse {
                    state: vec![],
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.read")]
    async fn read(
        &self,
        request: tonic::Request<generated::ReadRequest>,
    ) -> Result<tonic::Response<generated::ReadResponse>, tonic::Status> {
        let req = request.into_inner();
        debug!(resource_type = %req.resource_type, "Read called");

        let response = match self
            .provider
            .read(&req.resource_type, decode(&req.current_state))
            .await
        {
            Ok(result) => generated::ReadResponse {
                state: encode(&result.state),
                diagnostics: diagnostics_to_proto(result.diagnostics),
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "Read failed");
                // An unreadable resource keeps the state the host already has.
                generated::ReadResponse {
                    state: req.current_state,
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.update")]
    async fn update(
        &self,
        request: tonic::Request<generated::UpdateRequest>,
    ) -> Result<tonic::Response<generated::UpdateResponse>, tonic::Status> {
        let req = request.into_inner();
        info!(resource_type = %req.resource_type, "Update called");

        let response = match self
            .provider
            .update(
                &req.resource_type,
                decode(&req.prior_state),
                decode(&req.planned_state),
            )
            .await
        {
            Ok(result) => generated::UpdateResponse {
                state: encode(&result.state),
                diagnostics: diagnostics_to_proto(result.diagnostics),
            },
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "Update failed");
                generated::UpdateResponse {
                    state: req.prior_state,
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.delete")]
    async fn delete(
        &self,
        request: tonic::Request<generated::DeleteRequest>,
    ) -> Result<tonic::Response<generated::DeleteResponse>, tonic::Status> {
        let req = request.into_inner();
        info!(resource_type = %req.resource_type, "Delete called");

        let diagnostics = match self
            .provider
            .delete(&req.resource_type, decode(&req.current_state))
            .await
        {
            Ok(diagnostics) => diagnostics_to_proto(diagnostics),
            Err(e) => {
                error!(resource_type = %req.resource_type, error = %e, "Delete failed");
                error_to_proto(&e)
            },
        };
        Ok(tonic::Response::new(generated::DeleteResponse { diagnostics }))
    }

    #[instrument(skip(self, request), name = "grpc.import_resource_state")]
    async fn import_resource_state(
        &self,
        request: tonic::Request<generated::ImportResourceStateRequest>,
    ) -> Result<tonic::Response<generated::ImportResourceStateResponse>, tonic::Status> {
        let req = request.into_inner();
        info!(resource_type = %req.resource_type, id = %req.id, "ImportResourceState called");

        let response = match self
            .provider
            .import_resource(&req.resource_type, &req.id)
            .await
        {
            Ok(imported) => generated::ImportResourceStateResponse {
                imported: imported
                    .into_iter()
                    .map(|r| generated::ImportedResource {
                        resource_type: r.resource_type,
                        state: encode(&r.state),
                    })
                    .collect(),
                diagnostics: vec![],
            },
            Err(e) => {
                warn!(resource_type = %req.resource_type, error = %e, "ImportResourceState failed");
                generated::ImportResourceStateResponse {
                    imported: vec![],
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }

    #[instrument(skip(self, request), name = "grpc.validate_data_source_config")]
    async fn validate_data_source_config(
        &self,
        request: tonic::Request<generated::ValidateDataSourceConfigRequest>,
    ) -> Result<tonic::Response<generated::ValidateDataSourceConfigResponse>, tonic::Status> {
        let req = request.into_inner();
        debug!(data_source_type = %req.data_source_type, "ValidateDataSourceConfig called");
        let diagnostics = match self
            .provider
            .validate_data_source_config(&req.data_source_type, decode(&req.config))
            .await
        {
            Ok(diagnostics) => {
                log_validation("ValidateDataSourceConfig", &req.data_source_type, &diagnostics);
                diagnostics_to_proto(diagnostics)
            },
            Err(e) => {
                error!(data_source_type = %req.data_source_type, error = %e, "ValidateDataSourceConfig failed");
                error_to_proto(&e)
            },
        };
        Ok(tonic::Response::new(generated::ValidateDataSourceConfigResponse { diagnostics }))
    }

    #[instrument(skip(self, request), name = "grpc.read_data_source")]
    async fn read_data_source(
        &self,
        request: tonic::Request<generated::ReadDataSourceRequest>,
    ) -> Result<tonic::Response<generated::ReadDataSourceResponse>, tonic::Status> {
        let req = request.into_inner();
        debug!(data_source_type = %req.data_source_type, "ReadDataSource called");

        let response = match self
            .provider
            .read_data_source(&req.data_source_type, decode(&req.config))
            .await
        {
            Ok(state) => {
                info!(data_source_type = %req.data_source_type, "ReadDataSource completed successfully");
                generated::ReadDataSourceResponse {
                    state: encode(&state),
                    diagnostics: vec![],
                }
            },
            Err(e) => {
                error!(data_source_type = %req.data_source_type, error = %e, "ReadDataSource failed");
                generated::ReadDataSourceResponse {
                    state: vec![],
                    diagnostics: error_to_proto(&e),
                }
            },
        };
        Ok(tonic::Response::new(response))
    }
}

/// Options for configuring the provider server.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// How long in-flight requests may run after a shutdown signal.
    /// Default: 30 seconds.
    pub shutdown_timeout: Duration,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl ServeOptions {
    /// Create new serve options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// Wait for SIGTERM or SIGINT (CTRL+C elsewhere).
///
/// If the handlers cannot be installed the future never resolves, and the
/// process relies on the host killing it.
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
                    _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown"),
                }
            },
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to install signal handlers");
                std::future::pending::<()>().await;
            },
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received CTRL+C, initiating graceful shutdown"),
            Err(e) => {
                warn!(error = %e, "Failed to install CTRL+C handler");
                std::future::pending::<()>().await;
            },
        }
    }
}

/// Serve a provider on an ephemeral localhost port.
///
/// Prints `HEMMER_PROVIDER|<version>|<address>` on stdout once bound, then
/// serves until a shutdown signal arrives.
pub async fn serve<P: ProviderService>(provider: P) -> Result<(), Box<dyn std::error::Error>> {
    serve_with_options(provider, ServeOptions::default()).await
}

/// [`serve`] with custom options.
pub async fn serve_with_options<P: ProviderService>(
    provider: P,
    options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    serve_on_listener(provider, listener, addr, options).await
}

/// Serve a provider on a specific address.
pub async fn serve_on<P: ProviderService>(
    provider: P,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    serve_on_with_options(provider, addr, ServeOptions::default()).await
}

/// [`serve_on`] with custom options.
pub async fn serve_on_with_options<P: ProviderService>(
    provider: P,
    addr: SocketAddr,
    options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;
    serve_on_listener(provider, listener, actual_addr, options).await
}

async fn serve_on_listener<P: ProviderService>(
    provider: P,
    listener: TcpListener,
    addr: SocketAddr,
    options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}|{}|{}", HANDSHAKE_PREFIX, PROTOCOL_VERSION, addr);
    info!(address = %addr, "Provider server starting");

    let provider = Arc::new(provider);
    let grpc_service = ProviderGrpcService {
        provider: Arc::clone(&provider),
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = Server::builder()
        .add_service(generated::provider_server::ProviderServer::new(grpc_service))
        .serve_with_incoming_shutdown(
            tokio_stream::wrappers::TcpListenerStream::new(listener),
            async {
                let _ = shutdown_rx.await;
            },
        );
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            if let Err(e) = result {
                error!(error = %e, "Server error");
                return Err(e.into());
            }
        },
        _ = wait_for_shutdown_signal() => {
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(options.shutdown_timeout, &mut server).await {
                Ok(Ok(())) => info!("Server shutdown complete"),
                Ok(Err(e)) => {
                    error!(error = %e, "Server error during shutdown");
                    return Err(e.into());
                },
                Err(_) => warn!(
                    timeout = ?options.shutdown_timeout,
                    "Shutdown timeout exceeded, forcing shutdown"
                ),
            }
        },
    }

    if let Err(e) = provider.stop().await {
        warn!(error = %e, "Provider stop() returned error");
    }
    info!("Provider shutdown complete");
    Ok(())
}
