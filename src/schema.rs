//! Schema types for describing provider, resource and data source structure.
//!
//! Every adapter publishes a [`Schema`] built from these types. The host uses
//! it for validation and documentation, and the provider uses it for planning
//! (see [`Attribute::requires_replace`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
    /// A 64-bit floating point number.
    Float64,
    /// A boolean value.
    Bool,
    /// An ordered list of values of a single type.
    List(Box<AttributeType>),
    /// An unordered set of unique values of a single type.
    Set(Box<AttributeType>),
    /// A map from string keys to values of a single type.
    Map(Box<AttributeType>),
    /// An object with a fixed set of attributes.
    Object(BTreeMap<String, AttributeType>),
}

impl AttributeType {
    /// `list(element)`.
    pub fn list(element: AttributeType) -> Self {
        Self::List(Box::new(element))
    }

    /// `set(element)`.
    pub fn set(element: AttributeType) -> Self {
        Self::Set(Box::new(element))
    }

    /// A list of strings, the most common collection in the Dashboard API.
    pub fn string_list() -> Self {
        Self::list(Self::String)
    }

    /// A set of strings.
    pub fn string_set() -> Self {
        Self::set(Self::String)
    }
}

/// Who sets an attribute, and whether the host must mask it.
///
/// Exactly one of `required`, `optional` and `computed` is set by the
/// constructors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// Configuration must set it.
    pub required: bool,
    /// Configuration may set it.
    pub optional: bool,
    /// Only the provider sets it.
    pub computed: bool,
    /// Masked in plan output and logs, e.g. API keys.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Default::default()
        }
    }

    /// Flags for a computed attribute (read-only, set by the provider).
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Default::default()
        }
    }

    /// Whether configuration may set this attribute.
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The type of the attribute.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Markdown description of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Changing this attribute replaces the resource instead of updating it.
    #[serde(default)]
    pub requires_replace: bool,
    /// Reject an empty string at validation time.
    #[serde(default)]
    pub non_empty: bool,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            requires_replace: false,
            non_empty: false,
        }
    }

    /// A required attribute of the given type.
    pub fn required(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeFlags::required())
    }

    /// An optional attribute of the given type.
    pub fn optional(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeFlags::optional())
    }

    /// A computed attribute of the given type.
    pub fn computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeFlags::computed())
    }

    /// A required, non-empty string used as a URL path parameter.
    pub fn path_param(description: impl Into<String>) -> Self {
        let mut attr = Self::required_string().with_description(description);
        attr.non_empty = true;
        attr
    }

    // Scalar shorthands.

    #[allow(missing_docs)]
    pub fn required_string() -> Self {
        Self::required(AttributeType::String)
    }

    #[allow(missing_docs)]
    pub fn optional_string() -> Self {
        Self::optional(AttributeType::String)
    }

    #[allow(missing_docs)]
    pub fn computed_string() -> Self {
        Self::computed(AttributeType::String)
    }

    #[allow(missing_docs)]
    pub fn optional_int64() -> Self {
        Self::optional(AttributeType::Int64)
    }

    #[allow(missing_docs)]
    pub fn computed_int64() -> Self {
        Self::computed(AttributeType::Int64)
    }

    #[allow(missing_docs)]
    pub fn optional_float64() -> Self {
        Self::optional(AttributeType::Float64)
    }

    #[allow(missing_docs)]
    pub fn computed_float64() -> Self {
        Self::computed(AttributeType::Float64)
    }

    #[allow(missing_docs)]
    pub fn optional_bool() -> Self {
        Self::optional(AttributeType::Bool)
    }

    #[allow(missing_docs)]
    pub fn computed_bool() -> Self {
        Self::computed(AttributeType::Bool)
    }

    /// Set the description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this attribute as replacing the resource when changed.
    pub fn with_requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    /// Mark this attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.flags.sensitive = true;
        self
    }
}

/// How a nested block repeats.
///
/// The adapters only build `Single` and `List`; `Set` and `Map` exist so any
/// shape the host protocol can describe also validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockNestingMode {
    #[allow(missing_docs)]
    #[default]
    Single,
    #[allow(missing_docs)]
    List,
    #[allow(missing_docs)]
    Set,
    #[allow(missing_docs)]
    Map,
}

/// A group of attributes and nested blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The attributes within this block.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,
    /// Nested blocks within this block.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub blocks: BTreeMap<String, NestedBlock>,
    /// Markdown description of the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to this block.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to this block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }

    /// Set the description for this block.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether every attribute and nested block is computed.
    pub fn is_computed(&self) -> bool {
        self.attributes.values().all(|a| !a.flags.is_configurable())
            && self.blocks.values().all(|b| b.block.is_computed())
    }
}

/// A nested block with its nesting mode and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// The block definition.
    #[serde(flatten)]
    pub block: Block,
    /// Whether the block holds one object or repeats.
    #[serde(default)]
    pub nesting_mode: BlockNestingMode,
    /// Lower bound on occurrences.
    #[serde(default)]
    pub min_items: u32,
    /// Upper bound on occurrences; `0` means unbounded.
    #[serde(default)]
    pub max_items: u32,
    /// Changing anything inside the block replaces the resource.
    #[serde(default)]
    pub requires_replace: bool,
}

impl NestedBlock {
    fn with_mode(block: Block, nesting_mode: BlockNestingMode, max_items: u32) -> Self {
        Self {
            block,
            nesting_mode,
            min_items: 0,
            max_items,
            requires_replace: false,
        }
    }

    /// One object, e.g. a data source `item` or an action's `parameters`.
    pub fn single(block: Block) -> Self {
        Self::with_mode(block, BlockNestingMode::Single, 1)
    }

    /// An ordered list of objects, e.g. a data source `items`.
    pub fn list(block: Block) -> Self {
        Self::with_mode(block, BlockNestingMode::List, 0)
    }

    /// Mark the block as replacing the resource when anything in it changes.
    pub fn with_requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }
}

/// Schema for a resource or data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// The version of this schema (for state upgrades).
    #[serde(default)]
    pub version: u64,
    /// The root block containing all attributes and nested blocks.
    #[serde(flatten)]
    pub block: Block,
}

impl Schema {
    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::default()
    }

    /// Set the markdown description shown in generated docs.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.block.description = Some(description.into());
        self
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attr);
        self
    }

    /// Add a nested block to the schema.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.block.blocks.insert(name.into(), block);
        self
    }
}

/// Schema for the provider and everything it serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// Schema for provider configuration.
    #[serde(default)]
    pub provider: Schema,
    /// Schemas for each resource type.
    #[serde(default)]
    pub resources: BTreeMap<String, Schema>,
    /// Schemas for each data source type.
    #[serde(default)]
    pub data_sources: BTreeMap<String, Schema>,
}

impl ProviderSchema {
    /// Create a new empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Add a resource schema.
    pub fn with_resource(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(name.into(), schema);
        self
    }

    /// Add a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(name.into(), schema);
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// An error that prevents the operation from completing.
    Error,
    /// A warning that doesn't prevent the operation but should be addressed.
    Warning,
}

/// A diagnostic message from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short summary of the issue.
    pub summary: String,
    /// A detailed description of the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The attribute path where the issue occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Whether any diagnostic in the slice is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(required.is_configurable());

        let computed = AttributeFlags::computed();
        assert!(computed.computed);
        assert!(!computed.is_configurable());
    }

    #[test]
    fn test_path_param() {
        let attr = Attribute::path_param("Serial path parameter.");
        assert_eq!(attr.attr_type, AttributeType::String);
        assert!(attr.flags.required);
        assert!(attr.non_empty);
        assert!(!attr.requires_replace);
        assert_eq!(attr.description.as_deref(), Some("Serial path parameter."));

        let replaced = Attribute::path_param("Network ID").with_requires_replace();
        assert!(replaced.requires_replace);
    }

    #[test]
    fn test_schema_builder() {
        let schema = Schema::v0()
            .with_description("Reads a device")
            .with_attribute("serial", Attribute::path_param("serial"))
            .with_block(
                "item",
                NestedBlock::single(
                    Block::new()
                        .with_attribute("name", Attribute::computed_string())
                        .with_attribute("tags", Attribute::computed(AttributeType::string_list())),
                ),
            );

        assert_eq!(schema.version, 0);
        assert_eq!(schema.block.description.as_deref(), Some("Reads a device"));
        assert!(schema.block.attributes.contains_key("serial"));
        assert!(schema.block.blocks["item"].block.is_computed());
    }

    #[test]
    fn test_parameters_block_is_not_computed() {
        let parameters = NestedBlock::single(
            Block::new().with_attribute("pin", Attribute::optional_int64()),
        )
        .with_requires_replace();

        assert!(parameters.requires_replace);
        assert!(!parameters.block.is_computed());
    }

    #[test]
    fn test_provider_schema() {
        let provider_schema = ProviderSchema::new()
            .with_provider_config(Schema::v0().with_attribute(
                "meraki_dashboard_api_key",
                Attribute::optional_string().sensitive(),
            ))
            .with_resource("meraki_devices_reboot", Schema::v0())
            .with_data_source("meraki_devices", Schema::v0());

        assert!(provider_schema.provider.block.attributes["meraki_dashboard_api_key"]
            .flags
            .sensitive);
        assert!(provider_schema.resources.contains_key("meraki_devices_reboot"));
        assert!(provider_schema.data_sources.contains_key("meraki_devices"));
    }

    #[test]
    fn test_diagnostic() {
        let err = Diagnostic::error("Invalid configuration")
            .with_detail("The value must be positive")
            .with_attribute("parameters.pin");

        assert!(err.is_error());
        assert_eq!(err.attribute.as_deref(), Some("parameters.pin"));
        assert!(has_errors(&[Diagnostic::warning("w"), err]));
        assert!(!has_errors(&[Diagnostic::warning("w")]));
    }

    #[test]
    fn test_item_and_items_blocks() {
        let item = NestedBlock::single(Block::new());
        assert_eq!(item.nesting_mode, BlockNestingMode::Single);
        assert_eq!(item.max_items, 1);

        let items = NestedBlock::list(Block::new());
        assert_eq!(items.nesting_mode, BlockNestingMode::List);
        assert_eq!((items.min_items, items.max_items), (0, 0));
    }
}
