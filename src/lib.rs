//! dash-build - build orchestration for dash JavaScript bundles.
//!
//! Cleans previous outputs, installs npm packages, copies pinned dependency
//! builds, runs webpack, renders the Python package stub and writes
//! `digest.json`. The `renderer` and `dcc` binaries expose each stage as a
//! subcommand.

pub mod clean;
pub mod cli;
pub mod composite;
pub mod config;
pub mod confirm;
pub mod context;
pub mod deps;
pub mod digest;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod process;
pub mod profile;
pub mod template;
pub mod timing;

pub use error::{BuildError, Result};
