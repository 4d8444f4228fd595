use crate::TemplateError;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const BACKUP_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Serialize a merged document as pretty JSON and confirm it parses back
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the rendered text
/// does not parse as JSON
pub fn render_validated<T: Serialize>(merged: &T) -> Result<String, TemplateError> {
    let json = serde_json::to_string_pretty(merged)?;
    let _: Value = serde_json::from_str(&json)?;
    Ok(json)
}

/// Write a rendered document to a file
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create parent directories
/// - Unable to write to the file
pub fn write_output<P: AsRef<Path>>(path: P, rendered: &str) -> anyhow::Result<()> {
    let path_ref = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path_ref.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path_ref, format!("{rendered}\n"))?;
    debug!("Wrote {}", path_ref.display());

    Ok(())
}

/// Where the backup of `output` taken at `taken_at` goes: a sibling named
/// `<file>.backup.<YYYYmmdd_HHMMSS>`
#[must_use]
pub fn backup_path(output: &Path, taken_at: NaiveDateTime) -> PathBuf {
    let mut name: OsString = output.file_name().map_or_else(|| "output".into(), OsStr::to_os_string);
    name.push(format!(".backup.{}", taken_at.format(BACKUP_TIMESTAMP)));
    output.with_file_name(name)
}

/// Copy an existing output file aside before it is overwritten.
///
/// Returns the backup path, or `None` when there was nothing to back up.
/// A second backup within the same second gets a `.1`, `.2`, ... suffix
/// rather than replacing the first.
///
/// # Errors
///
/// Returns an error if the existing file cannot be copied
pub fn backup_output(output: &Path) -> io::Result<Option<PathBuf>> {
    if !output.is_file() {
        return Ok(None);
    }

    let base = backup_path(output, Local::now().naive_local());
    let mut target = base.clone();
    let mut attempt = 0_u32;
    while target.exists() {
        attempt += 1;
        let mut name = base.clone().into_os_string();
        name.push(format!(".{attempt}"));
        target = PathBuf::from(name);
    }

    fs::copy(output, &target)?;
    debug!("Backed up {} to {}", output.display(), target.display());
    Ok(Some(target))
}
