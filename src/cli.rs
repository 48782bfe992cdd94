//! Command-line surface shared by the `renderer` and `dcc` binaries.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

use crate::config::Config;
use crate::confirm::{self, AssumeYes, Confirm, StdinConfirm};
use crate::context::BuildContext;
use crate::pipeline::{Pipeline, Stage};
use crate::process::Npm;
use crate::profile::{BuildProfile, COMPONENTS, RENDERER};

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Clean all the previous assets generated by the build tool
    Clean,
    /// Remove the lock file and run `npm i --ignore-scripts`
    Npm,
    /// Run the bundler in dev (watch) mode
    Watch,
    /// Run the full process: clean, npm, bundles, digest
    Build,
    /// Compute the hash digest for the bundles
    Digest,
    /// Copy dependencies, run webpack and generate the package stub
    Bundles,
}

impl From<Command> for Stage {
    fn from(command: Command) -> Self {
        match command {
            Command::Clean => Stage::Clean,
            Command::Npm => Stage::Npm,
            Command::Watch => Stage::Watch,
            Command::Build => Stage::Build,
            Command::Digest => Stage::Digest,
            Command::Bundles => Stage::Bundles,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "renderer")]
#[command(about = "Build dash-renderer bundles")]
pub struct RendererCli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "dcc")]
#[command(about = "Build dash-core-components bundles")]
pub struct DccCli {
    #[command(subcommand)]
    pub command: Command,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    pub main: Option<String>,

    /// Don't ask before building outside a `dash-core-components` folder
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Resolve the root, run the guard if the profile has one, and run `command`.
pub fn run_profile(
    profile: &BuildProfile,
    command: Command,
    main: Option<&str>,
    config: &Config,
    cwd: &Path,
    confirmer: &mut dyn Confirm,
) -> Result<()> {
    let root = profile.resolve_root(main, &config.dash_root, cwd);
    info!("start the {} build process at {}", profile.name, root.display());

    if let Some(expected) = profile.expected_dir_name() {
        confirm::guard_root(&root, expected, confirmer)?;
    }

    let ctx = BuildContext::new(&root, profile)?;
    let pipeline = Pipeline::new(ctx, *profile, Npm::with_program(&config.npm));
    pipeline.run(command.into())?;
    Ok(())
}

pub fn run_renderer(cli: RendererCli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd);
    run_profile(&RENDERER, cli.command, None, &config, &cwd, &mut AssumeYes)
}

pub fn run_dcc(cli: DccCli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd);
    let mut confirmer: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm::stdin())
    };
    run_profile(
        &COMPONENTS,
        cli.command,
        cli.main.as_deref(),
        &config,
        &cwd,
        confirmer.as_mut(),
    )
}

/// Log a fatal error and map the result to the process exit code.
pub fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
