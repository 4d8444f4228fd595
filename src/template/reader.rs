use super::TEMPLATE_EXTENSION;
use crate::TemplateError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Check that the templates directory exists and is a directory
///
/// # Errors
///
/// Returns an error if the path does not exist or is not a directory
pub fn ensure_templates_dir(templates_dir: &Path) -> Result<(), TemplateError> {
    if !templates_dir.exists() {
        return Err(TemplateError::DirectoryNotFound(templates_dir.to_path_buf()));
    }

    if !templates_dir.is_dir() {
        return Err(TemplateError::NotADirectory(templates_dir.to_path_buf()));
    }

    Ok(())
}

/// Path a template name resolves to inside the templates directory
#[must_use]
pub fn template_path(templates_dir: &Path, name: &str) -> PathBuf {
    templates_dir.join(format!("{name}.{TEMPLATE_EXTENSION}"))
}

/// Load a template file and parse it as JSON
///
/// # Errors
///
/// Returns an error if:
/// - The template file does not exist
/// - The path is not a regular file
/// - Reading is denied or otherwise fails
/// - The file is empty or only whitespace
/// - The content is not valid JSON
pub fn load_template(templates_dir: &Path, name: &str) -> Result<Value, TemplateError> {
    let path = template_path(templates_dir, name);
    debug!("Loading template '{}' from {}", name, path.display());

    if !path.exists() {
        return Err(TemplateError::NotFound {
            available: list_templates(templates_dir),
            path,
        });
    }

    if !path.is_file() {
        return Err(TemplateError::NotAFile(path));
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return Err(read_error(path, e)),
    };

    if content.trim().is_empty() {
        return Err(TemplateError::Empty(path));
    }

    let value: Value = serde_json::from_str(&content).map_err(|e| invalid_json(path.clone(), &e))?;
    trace!("Parsed template '{}': {}", name, value);

    Ok(value)
}

/// Names of every template in a directory, sorted
///
/// Unreadable directories yield an empty list; this only feeds hints.
#[must_use]
pub fn list_templates(templates_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(templates_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(TEMPLATE_EXTENSION)
        })
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();

    names.sort();
    names
}

fn read_error(path: PathBuf, error: std::io::Error) -> TemplateError {
    if error.kind() == ErrorKind::PermissionDenied {
        TemplateError::PermissionDenied(path)
    } else {
        TemplateError::Read { path, source: error }
    }
}

fn invalid_json(path: PathBuf, error: &serde_json::Error) -> TemplateError {
    let full = error.to_string();
    let position = format!(" at line {} column {}", error.line(), error.column());
    let message = full.strip_suffix(&position).unwrap_or(&full).to_string();

    TemplateError::InvalidJson { path, line: error.line(), column: error.column(), message }
}
