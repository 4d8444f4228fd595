use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Delimiter that opens and closes a frontmatter block
const DELIMITER: &str = "---";

/// Extension of the files checked in a directory
const MARKDOWN_EXTENSION: &str = "md";

/// Values accepted for the `model` field unless overridden
pub const DEFAULT_MODELS: [&str; 3] = ["opus", "sonnet", "haiku"];

/// A single frontmatter problem, rendered as one report line
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("No .md files found in {}/", .directory.display())]
    NoMarkdownFiles { directory: PathBuf },

    #[error("{}: failed to read file: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: missing YAML frontmatter", .path.display())]
    Missing { path: PathBuf },

    #[error("{}: malformed frontmatter (missing closing ---)", .path.display())]
    Unterminated { path: PathBuf },

    #[error("{}: invalid YAML: {source}", .path.display())]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: frontmatter must be a YAML mapping", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("{}: missing required field \"{field}\"", .path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("{}: globs must be a list", .path.display())]
    GlobsNotList { path: PathBuf },

    #[error("{}: model must be {allowed}", .path.display())]
    InvalidModel { path: PathBuf, allowed: String },
}

/// What every frontmatter block is checked against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterRules {
    pub required_fields: Vec<String>,
    pub allowed_models: Vec<String>,
}

impl FrontmatterRules {
    /// Rules requiring `required_fields`, with the default model set
    pub fn new<I, S>(required_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_fields: required_fields.into_iter().map(Into::into).collect(),
            allowed_models: DEFAULT_MODELS.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// Replace the allowed model set
    #[must_use]
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_models = models.into_iter().map(Into::into).collect();
        self
    }
}

/// Outcome of validating a directory
#[derive(Debug, Default)]
pub struct FrontmatterReport {
    pub files_checked: usize,
    pub errors: Vec<FrontmatterError>,
}

impl FrontmatterReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the frontmatter of every markdown file directly inside `directory`.
///
/// Errors are collected across all files; a directory without markdown files
/// (or one that cannot be listed) yields a single `NoMarkdownFiles` error.
pub fn validate_directory(directory: &Path, rules: &FrontmatterRules) -> FrontmatterReport {
    let files = markdown_files(directory);

    if files.is_empty() {
        return FrontmatterReport {
            files_checked: 0,
            errors: vec![FrontmatterError::NoMarkdownFiles { directory: directory.to_path_buf() }],
        };
    }

    let mut errors = Vec::new();
    for path in &files {
        debug!("Validating frontmatter in {}", path.display());
        match fs::read_to_string(path) {
            Ok(content) => errors.extend(validate_content(path, &content, rules)),
            Err(source) => errors.push(FrontmatterError::Unreadable { path: path.clone(), source }),
        }
    }

    FrontmatterReport { files_checked: files.len(), errors }
}

/// Validate the frontmatter of one file's content
pub fn validate_content(
    path: &Path,
    content: &str,
    rules: &FrontmatterRules,
) -> Vec<FrontmatterError> {
    let path = path.to_path_buf();

    if !content.starts_with(DELIMITER) {
        return vec![FrontmatterError::Missing { path }];
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    let [_, header, _body] = parts.as_slice() else {
        return vec![FrontmatterError::Unterminated { path }];
    };

    let meta = if header.trim().is_empty() {
        Value::Null
    } else {
        match serde_yaml::from_str::<Value>(header) {
            Ok(meta) => meta,
            Err(source) => return vec![FrontmatterError::InvalidYaml { path, source }],
        }
    };

    let Value::Mapping(meta) = meta else {
        return vec![FrontmatterError::NotAMapping { path }];
    };
    trace!("Frontmatter of {}: {} field(s)", path.display(), meta.len());

    let mut errors: Vec<FrontmatterError> = rules
        .required_fields
        .iter()
        .filter(|field| !meta.contains_key(field.as_str()))
        .map(|field| FrontmatterError::MissingField { path: path.clone(), field: field.clone() })
        .collect();

    if meta.get("globs").is_some_and(|globs| !globs.is_sequence()) {
        errors.push(FrontmatterError::GlobsNotList { path: path.clone() });
    }

    if let Some(model) = meta.get("model") {
        let allowed = model
            .as_str()
            .is_some_and(|name| rules.allowed_models.iter().any(|m| m == name));
        if !allowed {
            errors.push(FrontmatterError::InvalidModel {
                path,
                allowed: describe_choices(&rules.allowed_models),
            });
        }
    }

    errors
}

/// Markdown files directly inside `directory`, hidden files excluded, sorted
fn markdown_files(directory: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(directory) else {
        debug!("Unable to list {}", directory.display());
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension().and_then(|s| s.to_str()) == Some(MARKDOWN_EXTENSION)
                && !path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| name.starts_with('.'))
        })
        .collect();

    files.sort();
    files
}

/// `"a"`, `"a" or "b"`, `"a", "b", or "c"`
fn describe_choices(choices: &[String]) -> String {
    let quoted: Vec<String> = choices.iter().map(|c| format!("\"{c}\"")).collect();

    match quoted.as_slice() {
        [] => "absent".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}
