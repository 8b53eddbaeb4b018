use anyhow::Result;
use std::path::PathBuf;

use crate::config::{Action, BuildOptions, InstallOptions};

mod install;
pub mod invocation;
pub mod process;

/// Build or test the package with the toolchain's package manager
pub fn run(action: Action, options: &BuildOptions) -> Result<()> {
    tracing::debug!(?options, %action, "invoking package manager");
    process::run(action, options)
}

/// Directory the package manager writes build products to
pub fn bin_path(options: &BuildOptions) -> Result<PathBuf> {
    process::capture_bin_path(options)
}

/// Install built products into a directory
pub fn install(options: &InstallOptions) -> Result<()> {
    let installed = install::run(options)?;
    tracing::debug!(count = installed.len(), "install complete");
    Ok(())
}
