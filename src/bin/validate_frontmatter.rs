#![allow(missing_docs)]

use template_tools::cli::{self, ValidateFrontmatterCli};
use template_tools::operations::run_validate_frontmatter;

fn main() {
    let cli: ValidateFrontmatterCli = cli::parse_or_exit();
    cli::initialize_tracing(cli.log);

    if !run_validate_frontmatter(&cli) {
        std::process::exit(1);
    }
}
