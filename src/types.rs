//! Plain Rust types exchanged between the server and the provider.
//!
//! These wrap the raw protobuf messages so the provider code never touches
//! JSON byte buffers directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Diagnostic;

/// A change to a single attribute during a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// The path to the attribute that changed.
    pub path: String,
    /// The value before the change (None if creating).
    pub before: Option<Value>,
    /// The value after the change (None if deleting).
    pub after: Option<Value>,
}

impl AttributeChange {
    /// Build a change from the prior and proposed value of `path`.
    ///
    /// JSON `null` on either side is recorded as absent.
    pub fn between(path: impl Into<String>, before: Option<&Value>, after: Option<&Value>) -> Self {
        let present = |v: Option<&Value>| v.filter(|v| !v.is_null()).cloned();
        Self {
            path: path.into(),
            before: present(before),
            after: present(after),
        }
    }
}

fn decode_json(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(bytes).ok()
    }
}

fn encode_json(value: Option<&Value>) -> Vec<u8> {
    value
        .and_then(|v| serde_json::to_vec(v).ok())
        .unwrap_or_default()
}

impl From<crate::generated::AttributeChange> for AttributeChange {
    fn from(proto: crate::generated::AttributeChange) -> Self {
        Self {
            path: proto.path,
            before: decode_json(&proto.before),
            after: decode_json(&proto.after),
        }
    }
}

impl From<AttributeChange> for crate::generated::AttributeChange {
    fn from(change: AttributeChange) -> Self {
        Self {
            before: encode_json(change.before.as_ref()),
            after: encode_json(change.after.as_ref()),
            path: change.path,
        }
    }
}

/// The result of a plan operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// The planned state after the operation.
    pub planned_state: Value,
    /// The list of attribute changes.
    pub changes: Vec<AttributeChange>,
    /// Whether the resource must be replaced.
    pub requires_replace: bool,
}

impl PlanResult {
    /// A plan that keeps `state` as-is.
    pub fn no_change(state: Value) -> Self {
        Self {
            planned_state: state,
            changes: Vec::new(),
            requires_replace: false,
        }
    }

    /// A plan carrying changes.
    pub fn with_changes(
        planned_state: Value,
        changes: Vec<AttributeChange>,
        requires_replace: bool,
    ) -> Self {
        Self {
            planned_state,
            changes,
            requires_replace,
        }
    }
}

/// New resource state plus any non-fatal diagnostics produced on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState {
    /// The state to persist.
    pub state: Value,
    /// Warnings to surface alongside the state.
    pub diagnostics: Vec<Diagnostic>,
}

impl ResourceState {
    /// State without diagnostics.
    pub fn new(state: Value) -> Self {
        Self {
            state,
            diagnostics: Vec::new(),
        }
    }

    /// Attach a diagnostic.
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// An imported resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedResource {
    /// The resource type.
    pub resource_type: String,
    /// The imported state.
    pub state: Value,
}

/// Provider metadata returned by GetMetadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// List of resource type names.
    pub resources: Vec<String>,
    /// List of data source type names.
    pub data_sources: Vec<String>,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
}

/// Server capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    /// Whether the provider supports planning destroy operations.
    pub plan_destroy: bool,
}

/// The protocol version for the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// The handshake prefix printed on stdout at startup.
pub const HANDSHAKE_PREFIX: &str = "HEMMER_PROVIDER";
