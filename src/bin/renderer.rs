//! `renderer` - build the dash-renderer bundles.

use clap::Parser;
use std::process::ExitCode;

use dash_build::cli::{self, RendererCli};

fn main() -> ExitCode {
    let cli = RendererCli::parse();
    dash_build::logging::init(cli.common.verbose);
    cli::finish(cli::run_renderer(cli))
}
