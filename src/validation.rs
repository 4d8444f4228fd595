use serde_json::Value;
use tracing::trace;

use crate::TemplateError;

const PERMISSION_LISTS: &[&str] = &["allow", "deny", "ask"];

/// Validates that a settings template has the expected structure
///
/// # Errors
///
/// Returns an error if:
/// - The template is not a JSON object
/// - `_version` is not a non-negative integer
/// - `permissions` is not an object
/// - `permissions.allow`, `permissions.deny` or `permissions.ask` is not an array of strings
pub fn validate_settings_template(template: &Value, name: &str) -> Result<(), TemplateError> {
    let Value::Object(map) = template else {
        return Err(TemplateError::NotAnObject { template: name.to_string() });
    };

    if let Some(version) = map.get("_version") {
        if version.as_u64().is_none() {
            return Err(invalid_field(name, "_version", "a non-negative integer"));
        }
    }

    let Some(permissions) = map.get("permissions") else {
        trace!("Template '{}' has no permissions", name);
        return Ok(());
    };

    let Value::Object(perm_map) = permissions else {
        return Err(invalid_field(name, "permissions", "an object"));
    };

    for key in PERMISSION_LISTS {
        let Some(list) = perm_map.get(*key) else {
            continue;
        };

        let field = format!("permissions.{key}");
        let Value::Array(items) = list else {
            return Err(invalid_field(name, &field, "an array"));
        };

        if !items.iter().all(Value::is_string) {
            return Err(invalid_field(name, &field, "an array of strings"));
        }
    }

    Ok(())
}

/// Validates that an MCP template has the expected structure
///
/// # Errors
///
/// Returns an error if:
/// - The template is not a JSON object
/// - `mcpServers` is present but not an object
pub fn validate_mcp_template(template: &Value, name: &str) -> Result<(), TemplateError> {
    let Value::Object(map) = template else {
        return Err(TemplateError::NotAnObject { template: name.to_string() });
    };

    match map.get("mcpServers") {
        Some(Value::Object(_)) | None => Ok(()),
        Some(_) => Err(invalid_field(name, "mcpServers", "an object")),
    }
}

fn invalid_field(name: &str, field: &str, expected: &'static str) -> TemplateError {
    TemplateError::InvalidField {
        template: name.to_string(),
        field: field.to_string(),
        expected,
    }
}
