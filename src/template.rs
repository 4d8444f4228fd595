#![allow(clippy::self_named_module_files)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{validate_mcp_template, validate_settings_template};
use crate::TemplateError;

pub mod reader;
pub mod writer;

/// File extension every template is stored under
pub const TEMPLATE_EXTENSION: &str = "json";

/// Permission lists carried by a settings template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionLists {
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
    #[serde(default)]
    pub ask: Vec<String>,
}

/// A validated settings template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsTemplate {
    /// Name the template was loaded under
    #[serde(
        rename = "_source",
        default,
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,

    #[serde(rename = "_version", default)]
    pub version: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionLists>,
}

impl SettingsTemplate {
    /// Validate a loaded template and attach the name it was loaded under.
    ///
    /// Any `_source` in the file itself is replaced by `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the settings template shape
    pub fn from_value(name: &str, value: &Value) -> Result<Self, TemplateError> {
        validate_settings_template(value, name)?;

        let mut template: Self = serde_json::from_value(value.clone())?;
        template.source = Some(name.to_string());
        Ok(template)
    }

    /// Convenience constructor used by tests and callers that build templates in code
    #[must_use]
    pub fn new(source: &str, version: u64, permissions: PermissionLists) -> Self {
        Self { source: Some(source.to_string()), version, permissions: Some(permissions) }
    }
}

/// A validated MCP server template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpTemplate {
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: Map<String, Value>,
}

impl McpTemplate {
    /// Validate a loaded template and keep only its server definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the MCP template shape
    pub fn from_value(name: &str, value: &Value) -> Result<Self, TemplateError> {
        validate_mcp_template(value, name)?;

        let servers = value
            .get("mcpServers")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self { mcp_servers: servers })
    }
}
