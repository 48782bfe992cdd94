//! The build pipeline: clean -> npm -> bundles -> digest.
//!
//! Each stage runs to completion before the next one starts and the first
//! error aborts the whole run. `watch` is a separate entry point that only
//! starts the bundler in dev mode.

use std::fs;
use tracing::{debug, info};

use crate::clean;
use crate::context::BuildContext;
use crate::deps;
use crate::digest::{self, DigestPayload};
use crate::error::{BuildError, Result};
use crate::paths;
use crate::process::Npm;
use crate::profile::BuildProfile;
use crate::template::{self, STUB_FILENAME, TEMPLATE_FILENAME};
use crate::timing::Timer;

/// Customized highlight.js bundle shipped by the components profile.
pub const HIGHLIGHT_ASSET: &str = "highlight.pack.js";

/// A pipeline operation, one per CLI subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    Npm,
    Watch,
    Bundles,
    Digest,
    Build,
}

impl Stage {
    pub fn description(self) -> &'static str {
        match self {
            Stage::Clean => "clean all the previous assets generated by build tool",
            Stage::Npm => "run `npm i --ignore-scripts`",
            Stage::Watch => "build the renderer in dev mode",
            Stage::Bundles => "copy and generate the bundles",
            Stage::Digest => "compute the hash digest for assets",
            Stage::Build => "run the full building process",
        }
    }
}

/// Runs stages for one project.
pub struct Pipeline {
    ctx: BuildContext,
    profile: BuildProfile,
    npm: Npm,
}

impl Pipeline {
    pub fn new(ctx: BuildContext, profile: BuildProfile, npm: Npm) -> Self {
        Self { ctx, profile, npm }
    }

    /// Run a stage by name.
    pub fn run(&self, stage: Stage) -> Result<()> {
        match stage {
            Stage::Clean => self.clean(),
            Stage::Npm => self.npm(),
            Stage::Watch => self.watch(),
            Stage::Bundles => self.bundles(),
            Stage::Digest => self.digest().map(|_| ()),
            Stage::Build => self.build(),
        }
    }

    /// Remove every generated asset path.
    pub fn clean(&self) -> Result<()> {
        let timer = Timer::start(Stage::Clean.description());
        let removed = clean::clean_all(&self.ctx.asset_paths)?;
        debug!("removed {} of {} asset paths", removed, self.ctx.asset_paths.len());
        timer.finish();
        Ok(())
    }

    /// Drop the lock file and reinstall packages without install scripts.
    pub fn npm(&self) -> Result<()> {
        let timer = Timer::start(Stage::Npm.description());
        clean::clean_path(&self.ctx.package_lock)?;
        self.npm.install(&self.ctx.root)?;
        timer.finish();
        Ok(())
    }

    /// Start the bundler in incremental dev mode.
    pub fn watch(&self) -> Result<()> {
        let timer = Timer::start(Stage::Watch.description());
        self.npm.watch(&self.ctx.root)?;
        timer.finish();
        Ok(())
    }

    /// The full sequence. The manifest is the snapshot read at startup, even
    /// though `npm` regenerates the lock file.
    pub fn build(&self) -> Result<()> {
        let timer = Timer::start(Stage::Build.description());
        self.clean()?;
        self.npm()?;
        self.bundles()?;
        self.digest()?;
        timer.finish();
        Ok(())
    }

    /// Write `digest.json` for the current output folder.
    pub fn digest(&self) -> Result<DigestPayload> {
        let timer = Timer::start(Stage::Digest.description());
        let manifest = &self.ctx.manifest;
        let payload = digest::write_digest(
            &manifest.name,
            &manifest.version,
            &self.ctx.output,
            &self.ctx.root,
        )?;
        timer.finish();
        Ok(payload)
    }

    /// Copy dependencies, run webpack and render the `__init__.py` stub.
    pub fn bundles(&self) -> Result<()> {
        let timer = Timer::start(Stage::Bundles.description());
        let ctx = &self.ctx;

        paths::ensure_dir_exists(&ctx.output)?;

        if self.profile.include_custom_highlight_asset {
            let source = ctx.root.join("assets").join(HIGHLIGHT_ASSET);
            let destination = ctx.output.join(HIGHLIGHT_ASSET);
            if !source.is_file() {
                return Err(BuildError::DependencyMissing(format!(
                    "{} not found",
                    source.display()
                )));
            }
            fs::copy(&source, &destination).map_err(|e| BuildError::io(&destination, e))?;
            info!("copy the customized highlight js");
        }

        let copied = deps::copy_dependencies(
            self.profile.dependencies,
            &ctx.manifest,
            &ctx.npm_modules,
            &ctx.output,
        )?;

        self.npm.build_bundles(&ctx.root)?;

        let mut vars = copied.versions;
        vars.insert("version".to_string(), ctx.manifest.version.clone());
        vars.insert("package".to_string(), ctx.manifest.name.replace([' ', '-'], "_"));

        info!("generate the `{}` from template and versions", STUB_FILENAME);
        template::render_file(
            &ctx.root.join(TEMPLATE_FILENAME),
            &ctx.output.join(STUB_FILENAME),
            &vars,
        )?;

        timer.finish();
        Ok(())
    }
}
