//! Meraki Provider
//!
//! A Hemmer provider that exposes the Cisco Meraki Dashboard API as data
//! sources (read-only queries) and action resources (one-shot operations
//! such as rebooting a device or wiping a Systems Manager device).
//!
//! # Overview
//!
//! - **[`MerakiProvider`]**: the [`ProviderService`] implementation; owns the
//!   adapter [`catalog`] and the Dashboard client
//! - **Data sources** ([`data_sources`]): one adapter per Dashboard getter
//! - **Action resources** ([`resources`]): one adapter per Dashboard mutator;
//!   only Create calls the API
//! - **Dashboard client** ([`client`]): the [`client::DashboardApi`] trait and
//!   its reqwest implementation
//! - **Server helpers**: [`serve`] starts the gRPC server and prints the
//!   handshake
//!
//! # Quick Start
//!
//! ```ignore
//! use meraki_provider::{init_logging, serve, MerakiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!     serve(MerakiProvider::new()).await
//! }
//! ```
//!
//! # Handshake Protocol
//!
//! When the provider starts via [`serve`], it outputs a handshake string to stdout:
//!
//! ```text
//! HEMMER_PROVIDER|1|127.0.0.1:50051
//! ```
//!
//! Format: `HEMMER_PROVIDER|<protocol_version>|<address>`
//!
//! # Configuration
//!
//! Every provider setting can come from the configuration block or the
//! environment; see [`config`]. The API key is read from
//! `MERAKI_DASHBOARD_API_KEY` when not configured explicitly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod convert;
pub mod data_sources;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod server;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

/// Types generated from `proto/provider.proto`.
#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod generated {
    tonic::include_proto!("hemmer.provider.v1");
}

// Re-export main types at crate root
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::MerakiProvider;
pub use schema::ProviderSchema;
pub use server::{
    serve, serve_on, serve_on_with_options, serve_with_options, ProviderService, ServeOptions,
};
pub use types::{
    AttributeChange, ImportedResource, PlanResult, ProviderMetadata, ResourceState,
    ServerCapabilities, HANDSHAKE_PREFIX, PROTOCOL_VERSION,
};
pub use validation::{validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
