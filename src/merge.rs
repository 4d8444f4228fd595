#![allow(clippy::self_named_module_files)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::template::McpTemplate;

pub mod permissions;

pub use permissions::{merge_permissions, MergedPermissions, MergedSettings};

/// `.mcp.json` document produced by merging MCP templates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpServersOutput {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: Map<String, Value>,
}

/// Merges MCP server templates in precedence order.
///
/// A later definition replaces an earlier one with the same name as a whole;
/// the server keeps the position where its name first appeared.
pub fn merge_mcp_servers(templates: &[McpTemplate]) -> McpServersOutput {
    let mut merged = Map::new();

    for template in templates {
        for (name, config) in &template.mcp_servers {
            if merged.insert(name.clone(), config.clone()).is_some() {
                debug!("MCP server '{}' overridden by a later template", name);
            }
        }
    }

    McpServersOutput { mcp_servers: merged }
}
