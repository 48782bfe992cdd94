//! `dcc` - build the dash-core-components bundles.

use clap::Parser;
use std::process::ExitCode;

use dash_build::cli::{self, DccCli};

fn main() -> ExitCode {
    let cli = DccCli::parse();
    dash_build::logging::init(cli.common.verbose);
    cli::finish(cli::run_dcc(cli))
}
