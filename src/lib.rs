#![allow(missing_docs)]

pub mod cli;
pub mod frontmatter;
pub mod merge;
pub mod operations;
pub mod template;
pub mod validation;

pub use frontmatter::{validate_directory, FrontmatterError, FrontmatterReport, FrontmatterRules};
pub use merge::{merge_mcp_servers, merge_permissions, MergedSettings};
pub use template::{McpTemplate, SettingsTemplate};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Templates directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Template not found: {}", .path.display())]
    NotFound { path: PathBuf, available: Vec<String> },

    #[error("Template path is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Template file is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("Invalid JSON in {}\n  Line {line}, column {column}: {message}", .path.display())]
    InvalidJson { path: PathBuf, line: usize, column: usize, message: String },

    #[error("Permission denied reading {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template '{template}' must be a JSON object")]
    NotAnObject { template: String },

    #[error("'{field}' in '{template}' must be {expected}")]
    InvalidField { template: String, field: String, expected: &'static str },

    #[error("Generated invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TemplateError {
    /// Follow-up line printed under the error, if the error has one
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotFound { path, available } if available.is_empty() => {
                let dir = path.parent().map_or_else(|| ".".into(), |p| p.display().to_string());
                Some(format!("Run 'ls {dir}' to see available templates"))
            },
            Self::NotFound { available, .. } => {
                Some(format!("Available templates: {}", available.join(", ")))
            },
            _ => None,
        }
    }
}
