//! Tool argument descriptors used to build MCP input schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP argument definition for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgument {
    /// Argument name.
    pub name: String,
    /// JSON Schema type (string, integer, boolean, array...).
    #[serde(rename = "type")]
    pub arg_type: String,
    /// Human-readable description.
    pub description: String,
    /// Whether this argument is required.
    #[serde(default)]
    pub required: bool,
    /// Default value if not required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Element type for `array` arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    /// Allowed values, if the argument is an enumeration.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl ToolArgument {
    fn new(name: &str, arg_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            arg_type: arg_type.to_string(),
            description: description.to_string(),
            required: false,
            default: None,
            items: None,
            allowed: Vec::new(),
        }
    }

    /// A string argument.
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, "string", description)
    }

    /// An integer argument.
    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(name, "integer", description)
    }

    /// A boolean argument.
    pub fn boolean(name: &str, description: &str) -> Self {
        Self::new(name, "boolean", description)
    }

    /// An array-of-strings argument.
    pub fn string_list(name: &str, description: &str) -> Self {
        Self {
            items: Some("string".to_string()),
            ..Self::new(name, "array", description)
        }
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value advertised in the schema.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restricts the argument (or its elements) to a set of values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = values.iter().map(|v| (*v).to_string()).collect();
        self
    }
}
