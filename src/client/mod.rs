//! Meraki Dashboard API client
//!
//! [`DashboardApi`] is the seam adapters call through. [`MerakiClient`] is the
//! reqwest implementation; [`MockDashboardApi`] serves canned JSON in tests
//! (enable the `test-util` feature to use it from other crates).

pub mod api;
pub mod error;
pub mod meraki;
#[allow(missing_docs)]
pub mod models;
pub mod query;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use api::{ops, ApiResponse, DashboardApi};
pub use error::ClientError;
pub use meraki::{ClientOptions, MerakiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCall, MockDashboardApi};
pub use query::{Query, ToQuery};
