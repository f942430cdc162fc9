//! Validation of JSON configuration against a [`Schema`].
//!
//! Runs before any adapter decodes its typed config, so a bad configuration
//! never reaches the Dashboard API. All problems are collected; nothing
//! stops at the first error.
//!
//! # Example
//!
//! ```
//! use meraki_provider::schema::{Attribute, Schema};
//! use meraki_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("serial", Attribute::path_param("Device serial"))
//!     .with_attribute("timespan", Attribute::optional_float64());
//!
//! assert!(validate(&schema, &json!({"serial": "Q2XX-XXXX"})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"serial": ""}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("serial".to_string()));
//! ```

use crate::schema::{
    Attribute, AttributeType, Block, BlockNestingMode, Diagnostic, NestedBlock, Schema,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validate a JSON value against a schema.
///
/// Rules:
///
/// - Required attributes must be present, non-null, and non-empty when the
///   attribute is flagged `non_empty`
/// - Computed-only attributes and blocks must be null or absent
/// - Keys the schema does not declare are rejected
/// - Attribute types must match, recursively
/// - Nested blocks honour their min/max item constraints
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block(&schema.block, value, "", &mut diagnostics);
    diagnostics
}

/// Like [`validate`], returning `Err` with the diagnostics when invalid.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

fn validate_block(block: &Block, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let obj = match value {
        Value::Object(map) => map,
        Value::Null => return,
        other => {
            let diagnostic = Diagnostic::error("Expected object")
                .with_detail(format!("Got {}", value_type_name(other)));
            diagnostics.push(if path.is_empty() {
                diagnostic
            } else {
                diagnostic.with_attribute(path)
            });
            return;
        },
    };

    reject_unknown_keys(block, obj, path, diagnostics);

    for (name, attr) in &block.attributes {
        validate_attribute(attr, obj.get(name), &join_path(path, name), diagnostics);
    }

    for (name, nested) in &block.blocks {
        validate_nested_block(nested, obj.get(name), &join_path(path, name), diagnostics);
    }
}

fn reject_unknown_keys(
    block: &Block,
    obj: &Map<String, Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for key in obj.keys() {
        if !block.attributes.contains_key(key) && !block.blocks.contains_key(key) {
            let key_path = join_path(path, key);
            diagnostics.push(
                Diagnostic::error(format!("Unsupported argument '{}'", key_path))
                    .with_detail("An argument with this name is not expected here")
                    .with_attribute(key_path),
            );
        }
    }
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let value = match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
            return;
        },
        Some(v) => v,
    };

    if !attr.flags.is_configurable() {
        diagnostics.push(
            Diagnostic::error(format!("Value for unconfigurable attribute '{}'", path))
                .with_detail("This attribute is computed by the provider and cannot be set")
                .with_attribute(path),
        );
        return;
    }

    if attr.non_empty && value.as_str() == Some("") {
        diagnostics.push(
            Diagnostic::error(format!("Attribute '{}' must not be empty", path))
                .with_detail("Path parameters are interpolated into the request URL")
                .with_attribute(path),
        );
        return;
    }

    validate_attribute_type(&attr.attr_type, value, path, diagnostics);
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String if !value.is_string() => {
            diagnostics.push(type_error(path, "string", value));
        },
        AttributeType::Int64 if !is_int64(value) => {
            diagnostics.push(type_error(path, "int64", value));
        },
        AttributeType::Float64 if !value.is_number() => {
            diagnostics.push(type_error(path, "float64", value));
        },
        AttributeType::Bool if !value.is_boolean() => {
            diagnostics.push(type_error(path, "bool", value));
        },
        AttributeType::List(element_type) | AttributeType::Set(element_type) => {
            let expected = if matches!(attr_type, AttributeType::Set(_)) {
                "set"
            } else {
                "list"
            };
            match value.as_array() {
                Some(arr) => {
                    for (i, elem) in arr.iter().enumerate() {
                        let elem_path = format!("{}.{}", path, i);
                        validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                    }
                },
                None => diagnostics.push(type_error(path, expected, value)),
            }
        },
        AttributeType::Map(value_type) => match value.as_object() {
            Some(obj) => {
                for (key, val) in obj {
                    let key_path = format!("{}.{}", path, key);
                    validate_attribute_type(value_type, val, &key_path, diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, "map", value)),
        },
        AttributeType::Object(attrs) => match value.as_object() {
            Some(obj) => validate_object_type(attrs, obj, path, diagnostics),
            None => diagnostics.push(type_error(path, "object", value)),
        },
        _ => {},
    }
}

fn validate_object_type(
    attrs: &BTreeMap<String, AttributeType>,
    obj: &Map<String, Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (name, attr_type) in attrs {
        if let Some(value) = obj.get(name).filter(|v| !v.is_null()) {
            validate_attribute_type(attr_type, value, &join_path(path, name), diagnostics);
        }
    }
}

fn validate_nested_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let value = match value {
        None | Some(Value::Null) => {
            if nested.min_items > 0 {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s)",
                        path, nested.min_items
                    ))
                    .with_attribute(path),
                );
            }
            return;
        },
        Some(v) => v,
    };

    if nested.block.is_computed() {
        diagnostics.push(
            Diagnostic::error(format!("Value for unconfigurable block '{}'", path))
                .with_detail("This block is computed by the provider and cannot be set")
                .with_attribute(path),
        );
        return;
    }

    match nested.nesting_mode {
        BlockNestingMode::Single => validate_block(&nested.block, value, path, diagnostics),
        BlockNestingMode::List | BlockNestingMode::Set => match value.as_array() {
            Some(arr) => {
                check_item_count(nested, arr.len(), path, diagnostics);
                for (i, item) in arr.iter().enumerate() {
                    validate_block(&nested.block, item, &format!("{}.{}", path, i), diagnostics);
                }
            },
            None => diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", value_type_name(value)))
                    .with_attribute(path),
            ),
        },
        BlockNestingMode::Map => match value.as_object() {
            Some(obj) => {
                check_item_count(nested, obj.len(), path, diagnostics);
                for (key, item) in obj {
                    validate_block(&nested.block, item, &format!("{}.{}", path, key), diagnostics);
                }
            },
            None => diagnostics.push(
                Diagnostic::error(format!("Expected map for block '{}'", path))
                    .with_detail(format!("Got {}", value_type_name(value)))
                    .with_attribute(path),
            ),
        },
    }
}

fn check_item_count(
    nested: &NestedBlock,
    len: usize,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let len = len as u32;
    if len < nested.min_items {
        diagnostics.push(
            Diagnostic::error(format!(
                "Block '{}' requires at least {} item(s), got {}",
                path, nested.min_items, len
            ))
            .with_attribute(path),
        );
    }
    // max_items == 0 means unlimited
    if nested.max_items > 0 && len > nested.max_items {
        diagnostics.push(
            Diagnostic::error(format!(
                "Block '{}' allows at most {} item(s), got {}",
                path, nested.max_items, len
            ))
            .with_attribute(path),
        );
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.as_i64().is_some(),
        Value::Number(n) => n
            .as_f64()
            .map(|f| f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
            .unwrap_or(false),
        _ => false,
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!("Expected {}, got {}", expected, value_type_name(got)))
        .with_attribute(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Block, NestedBlock, Schema};
    use serde_json::json;

    fn wipe_schema() -> Schema {
        Schema::v0()
            .with_attribute(
                "network_id",
                Attribute::path_param("networkId path parameter.").with_requires_replace(),
            )
            .with_block(
                "parameters",
                NestedBlock::single(
                    Block::new()
                        .with_attribute("serial", Attribute::optional_string())
                        .with_attribute("pin", Attribute::optional_int64()),
                )
                .with_requires_replace(),
            )
            .with_block(
                "item",
                NestedBlock::single(Block::new().with_attribute("id", Attribute::computed_string())),
            )
    }

    #[test]
    fn test_valid_action_config() {
        let config = json!({
            "network_id": "N_1",
            "parameters": {"serial": "Q2YY-1111", "pin": 1234},
            "item": null
        });
        assert!(validate(&wipe_schema(), &config).is_empty());
        assert!(validate_result(&wipe_schema(), &config).is_ok());
    }

    #[test]
    fn test_missing_required_path_param() {
        let diagnostics = validate(&wipe_schema(), &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("network_id"));
        assert!(diagnostics[0].summary.contains("Missing required attribute"));
    }

    #[test]
    fn test_empty_path_param_rejected() {
        let diagnostics = validate(&wipe_schema(), &json!({"network_id": ""}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("must not be empty"));
    }

    #[test]
    fn test_nested_type_error_path() {
        let config = json!({"network_id": "N_1", "parameters": {"pin": "1234"}});
        let diagnostics = validate(&wipe_schema(), &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("parameters.pin"));
        assert_eq!(diagnostics[0].detail.as_deref(), Some("Expected int64, got string"));
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let config = json!({"network_id": "N_1", "parameters": {"wifimac": "aa"}});
        let diagnostics = validate(&wipe_schema(), &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("parameters.wifimac"));
    }

    #[test]
    fn test_computed_block_cannot_be_set() {
        let config = json!({"network_id": "N_1", "item": {"id": "dev123"}});
        let diagnostics = validate(&wipe_schema(), &config);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("unconfigurable block"));
    }

    #[test]
    fn test_computed_attribute_cannot_be_set() {
        let schema = Schema::v0().with_attribute("id", Attribute::computed_string());
        let diagnostics = validate(&schema, &json!({"id": "x"}));
        assert_eq!(diagnostics.len(), 1);
        assert!(validate(&schema, &json!({"id": null})).is_empty());
    }

    #[test]
    fn test_list_elements_typed() {
        let schema = Schema::v0()
            .with_attribute("serials", Attribute::optional(AttributeType::string_list()));
        assert!(validate(&schema, &json!({"serials": ["a", "b"]})).is_empty());

        let diagnostics = validate(&schema, &json!({"serials": ["a", 2]}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("serials.1"));

        let diagnostics = validate(&schema, &json!({"serials": "a"}));
        assert_eq!(diagnostics[0].detail.as_deref(), Some("Expected list, got string"));
    }

    #[test]
    fn test_int64_accepts_integral_floats() {
        assert!(is_int64(&json!(5)));
        assert!(is_int64(&json!(5.0)));
        assert!(!is_int64(&json!(5.5)));
        assert!(!is_int64(&json!("5")));
    }

    #[test]
    fn test_list_block_item_limits() {
        let schema = Schema::v0().with_block(
            "rules",
            NestedBlock {
                min_items: 1,
                max_items: 2,
                ..NestedBlock::list(Block::new().with_attribute("id", Attribute::optional_string()))
            },
        );

        assert_eq!(validate(&schema, &json!({"rules": []})).len(), 1);
        assert_eq!(validate(&schema, &json!({"rules": [{}, {}, {}]})).len(), 1);
        assert!(validate(&schema, &json!({"rules": [{"id": "a"}]})).is_empty());
        assert_eq!(validate(&schema, &json!({})).len(), 1);
    }

    #[test]
    fn test_root_must_be_object() {
        let diagnostics = validate(&wipe_schema(), &json!([1, 2]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].attribute.is_none());
        assert!(validate(&wipe_schema(), &Value::Null).is_empty());
    }
}
