use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::cli::{MergeMcpCli, MergeSettingsCli, OutputArgs, ValidateFrontmatterCli};
use crate::frontmatter::{validate_directory, FrontmatterRules};
use crate::merge::{merge_mcp_servers, merge_permissions};
use crate::template::{reader, writer, McpTemplate, SettingsTemplate};
use crate::TemplateError;

/// Load and validate every named template, stopping at the first failure
///
/// # Errors
///
/// Returns the first loader or shape error encountered
pub fn load_templates<T>(
    templates_dir: &Path,
    names: &[String],
    validate: impl Fn(&str, &Value) -> Result<T, TemplateError>,
) -> Result<Vec<T>, TemplateError> {
    reader::ensure_templates_dir(templates_dir)?;

    names
        .iter()
        .map(|name| {
            let value = reader::load_template(templates_dir, name)?;
            validate(name, &value)
        })
        .collect()
}

/// Print a rendered document, or write it to the requested output file
///
/// # Errors
///
/// Returns an error if the backup or the output file cannot be written
pub fn emit(rendered: &str, output: &OutputArgs) -> Result<()> {
    let Some(path) = &output.output else {
        println!("{rendered}");
        return Ok(());
    };

    if output.backup {
        if let Some(backup) = writer::backup_output(path)
            .with_context(|| format!("Failed to back up {}", path.display()))?
        {
            eprintln!("Backup created: {}", backup.display());
        }
    }

    writer::write_output(path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Merge settings templates and emit the merged document
///
/// # Errors
///
/// Returns an error if any template fails to load or validate, or the output
/// cannot be rendered or written
pub fn run_merge_settings(cli: &MergeSettingsCli) -> Result<()> {
    let templates = load_templates(&cli.templates_dir, &cli.names, SettingsTemplate::from_value)?;
    debug!("Merging {} settings template(s)", templates.len());

    let merged = merge_permissions(&templates);
    let rendered = writer::render_validated(&merged)?;
    emit(&rendered, &cli.output)
}

/// Merge MCP templates and emit the merged document
///
/// # Errors
///
/// Returns an error if any template fails to load or validate, or the output
/// cannot be rendered or written
pub fn run_merge_mcp(cli: &MergeMcpCli) -> Result<()> {
    let templates = load_templates(&cli.templates_dir, &cli.names, McpTemplate::from_value)?;
    debug!("Merging {} MCP template(s)", templates.len());

    let merged = merge_mcp_servers(&templates);
    let rendered = writer::render_validated(&merged)?;
    emit(&rendered, &cli.output)
}

/// Validate a directory of markdown files and print the outcome.
///
/// Returns `true` when every file is valid.
pub fn run_validate_frontmatter(cli: &ValidateFrontmatterCli) -> bool {
    let rules = FrontmatterRules::new(cli.fields.iter().cloned()).with_models(cli.models.clone());
    let report = validate_directory(&cli.directory, &rules);

    if report.is_valid() {
        println!("All {} files in {}/ valid", report.files_checked, cli.directory.display());
        return true;
    }

    for error in &report.errors {
        eprintln!("ERROR: {error}");
    }
    false
}

/// Print a merge failure as `Error:` lines on standard error
pub fn report_error(error: &anyhow::Error) {
    if let Some(template_error) = error.downcast_ref::<TemplateError>() {
        eprintln!("Error: {template_error}");
        if let Some(hint) = template_error.hint() {
            eprintln!("Hint: {hint}");
        }
    } else {
        eprintln!("Error: {error:#}");
    }
}
