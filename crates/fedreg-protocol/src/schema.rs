//! JSON Schema helpers for MCP tool input validation.
//!
//! Covers the subset the tool catalog emits: an object with typed
//! `properties`, a `required` list, `items.type` on arrays and `enum`.

use serde_json::Value;
use thiserror::Error;

/// Schema validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input does not match the expected schema.
    #[error("schema validation failed: {message}")]
    ValidationFailed { message: String },
    /// The schema itself is malformed.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

fn failed(message: String) -> SchemaError {
    SchemaError::ValidationFailed { message }
}

/// Checks that a JSON value contains required properties from a schema.
///
/// A `null` input is treated as an empty object, since MCP clients may
/// omit `arguments` for tools without parameters.
pub fn validate_required_fields(schema: &Value, input: &Value) -> Result<(), SchemaError> {
    let required = match schema.get("required") {
        Some(Value::Array(arr)) => arr,
        _ => return Ok(()),
    };

    let empty = serde_json::Map::new();
    let input_obj = match input {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(failed("input must be an object".to_string())),
    };

    for field in required {
        let field_name = field.as_str().ok_or_else(|| SchemaError::InvalidSchema {
            message: "required field names must be strings".to_string(),
        })?;
        if input_obj.get(field_name).map_or(true, Value::is_null) {
            return Err(failed(format!("missing required field: {field_name}")));
        }
    }

    Ok(())
}

/// Validates required fields, then the type of every provided property.
///
/// Unknown properties are accepted and left to the tool to ignore.
pub fn validate_arguments(schema: &Value, input: &Value) -> Result<(), SchemaError> {
    validate_required_fields(schema, input)?;

    let (Some(Value::Object(properties)), Value::Object(args)) =
        (schema.get("properties"), input)
    else {
        return Ok(());
    };

    for (name, value) in args {
        if value.is_null() {
            continue;
        }
        let Some(prop) = properties.get(name) else {
            continue;
        };
        check_type(name, prop, value)?;
        if let (Some(item_schema), Value::Array(values)) = (prop.get("items"), value) {
            for (i, element) in values.iter().enumerate() {
                check_type(&format!("{name}[{i}]"), item_schema, element)?;
            }
        }
    }
    Ok(())
}

/// Checks `value` against the `type` and `enum` of one property schema.
fn check_type(name: &str, prop: &Value, value: &Value) -> Result<(), SchemaError> {
    if let Some(expected) = prop.get("type").and_then(Value::as_str) {
        let ok = match expected {
            "string" => value.is_string(),
            "integer" => value.is_i64() || value.is_u64(),
            "number" => value.is_number(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            other => {
                return Err(SchemaError::InvalidSchema {
                    message: format!("unsupported type '{other}' for '{name}'"),
                })
            }
        };
        if !ok {
            return Err(failed(format!("'{name}' must be of type {expected}")));
        }
    }
    if let Some(Value::Array(allowed)) = prop.get("enum") {
        if !allowed.contains(value) {
            return Err(failed(format!("'{name}' must be one of {}", Value::Array(allowed.clone()))));
        }
    }
    Ok(())
}
