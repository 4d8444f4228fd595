#![allow(missing_docs)]

use template_tools::cli::{self, MergeSettingsCli};
use template_tools::operations::{report_error, run_merge_settings};

fn main() {
    let cli: MergeSettingsCli = cli::parse_or_exit();
    cli::initialize_tracing(cli.log);

    if let Err(e) = run_merge_settings(&cli) {
        report_error(&e);
        std::process::exit(1);
    }
}
