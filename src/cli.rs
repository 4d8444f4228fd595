use clap::{Args, Parser};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::frontmatter::DEFAULT_MODELS;

/// Logging flags shared by every tool
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LogArgs {
    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,
}

/// Where a merged document goes
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the merged document to this file instead of standard output
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Create timestamped backup of the output file before overwriting it
    #[arg(short, long, requires = "output")]
    pub backup: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "merge-settings",
    about = "Merge permission templates into a single settings document",
    long_about = "Merge multiple settings template files into a single settings document.

Each NAME is loaded from <TEMPLATES_DIR>/<NAME>.json, in the order given.

Precedence rules:
  • deny > allow: a pattern in any deny list never appears in allow
  • allow and ask keep the position of their first occurrence
  • _version is the highest version of all templates

Examples:
  # Merge base.json, django.json and react.json
  merge-settings ./settings-templates base django react

  # Write the result to a file, keeping a backup of the previous one
  merge-settings ./settings-templates base -o .claude/settings.local.json --backup",
    version
)]
pub struct MergeSettingsCli {
    /// Directory containing the template files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub templates_dir: PathBuf,

    /// Template names, without the .json extension
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "merge-mcp",
    about = "Merge MCP server templates into a single .mcp.json document",
    long_about = "Merge multiple MCP template files into a single .mcp.json document.

Each NAME is loaded from <TEMPLATES_DIR>/<NAME>.json, in the order given.
Later templates replace earlier ones when server names collide.

Examples:
  merge-mcp ./mcp-templates base django
  merge-mcp ./mcp-templates base django -o .mcp.json",
    version
)]
pub struct MergeMcpCli {
    /// Directory containing the template files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub templates_dir: PathBuf,

    /// Template names, without the .json extension
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "validate-frontmatter",
    about = "Validate YAML frontmatter in markdown files",
    long_about = "Validate the YAML frontmatter of every *.md file in a directory.

Every file must start with a --- delimited YAML mapping containing all of the
required fields. When present, `globs` must be a list and `model` must be one
of the allowed models.

Examples:
  validate-frontmatter agents name description model
  validate-frontmatter skills name description globs",
    version
)]
pub struct ValidateFrontmatterCli {
    /// Directory containing the markdown files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub directory: PathBuf,

    /// Fields every frontmatter block must define
    #[arg(required = true, num_args = 1..)]
    pub fields: Vec<String>,

    /// Allowed values for the `model` field (repeat to allow several)
    #[arg(long = "model", value_name = "MODEL", default_values = DEFAULT_MODELS)]
    pub models: Vec<String>,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Parse arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still print to standard output and exit 0.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            // Printing only fails when stderr itself is gone
            let _ = err.print();
            std::process::exit(1);
        },
    }
}

/// Initialize tracing with the specified debug/trace flags
pub fn initialize_tracing(log: LogArgs) {
    let log_level = if log.trace {
        Level::TRACE
    } else if log.debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}
