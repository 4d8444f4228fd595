#![allow(missing_docs)]

use template_tools::cli::{self, MergeMcpCli};
use template_tools::operations::{report_error, run_merge_mcp};

fn main() {
    let cli: MergeMcpCli = cli::parse_or_exit();
    cli::initialize_tracing(cli.log);

    if let Err(e) = run_merge_mcp(&cli) {
        report_error(&e);
        std::process::exit(1);
    }
}
