//! Error types for the Meraki provider.

use thiserror::Error;

use crate::client::ClientError;
use crate::schema::{Diagnostic, DiagnosticSeverity};

/// Errors surfaced by provider operations.
///
/// Every variant converts into protocol diagnostics with
/// [`ProviderError::to_diagnostics`], which is how the host sees it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A Dashboard API call failed or returned no body.
    #[error("Failure when executing {operation}: {detail}")]
    Api {
        /// Dashboard operation id, e.g. `GetDevice`.
        operation: String,
        /// Error text reported by the client.
        detail: String,
    },

    /// Schema validation or typed decoding produced error diagnostics.
    #[error("{} invalid attribute(s)", .0.len())]
    Diagnostics(Vec<Diagnostic>),

    /// An operation needing the API client ran before `Configure`.
    #[error("Provider not configured: call Configure before using resources or data sources")]
    NotConfigured,

    /// Provider configuration could not be applied.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource type is not in the catalog.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// The requested data source type is not in the catalog.
    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A gRPC transport error occurred.
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// Operation not implemented for this type.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),
}

impl ProviderError {
    /// Build a call failure for the given Dashboard operation.
    pub fn api(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Api {
            operation: operation.into(),
            detail: err.to_string(),
        }
    }

    /// Build a call failure for a successful call that returned no body.
    pub fn empty_response(operation: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            detail: "the API returned an empty response".to_string(),
        }
    }

    /// Wrap a client error raised by `operation`.
    pub fn from_client(operation: &str, err: ClientError) -> Self {
        Self::api(operation, err)
    }

    /// Convert this error into the diagnostics reported to the host.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Self::Api { operation, detail } => {
                vec![Diagnostic::error(format!("Failure when executing {}", operation))
                    .with_detail(format!("err: {}", detail))]
            },
            Self::Diagnostics(diagnostics) => diagnostics.clone(),
            other => vec![Diagnostic::error(other.to_string())],
        }
    }

    /// Whether this error carries at least one error-severity diagnostic.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Diagnostics(diagnostics) => diagnostics
                .iter()
                .any(|d| d.severity == DiagnosticSeverity::Error),
            _ => true,
        }
    }
}

impl From<ProviderError> for tonic::Status {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { .. } => tonic::Status::unavailable(err.to_string()),
            ProviderError::Diagnostics(_) => tonic::Status::invalid_argument(err.to_string()),
            ProviderError::NotConfigured => tonic::Status::failed_precondition(err.to_string()),
            ProviderError::Configuration(msg) => tonic::Status::failed_precondition(msg),
            ProviderError::UnknownResource(msg) | ProviderError::UnknownDataSource(msg) => {
                tonic::Status::not_found(msg)
            },
            ProviderError::Serialization(err) => {
                tonic::Status::invalid_argument(format!("Serialization error: {}", err))
            },
            ProviderError::Transport(err) => {
                tonic::Status::unavailable(format!("Transport error: {}", err))
            },
            ProviderError::Unimplemented(msg) => tonic::Status::unimplemented(msg),
        }
    }
}
