use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use super::invocation::Invocation;
use crate::config::{Action, BuildOptions};

/// The package manager ran but exited unsuccessfully.
///
/// Carried through `anyhow::Error` so `main` can exit with the child's own
/// status instead of reporting a wrapped error.
#[derive(Debug)]
pub struct CommandFailed {
    pub command: String,
    pub status: ExitStatus,
}

impl CommandFailed {
    /// The exit code the helper should finish with.
    pub fn exit_code(&self) -> u8 {
        if let Some(code) = self.status.code() {
            return u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return 128u8.saturating_add(signal as u8);
            }
        }

        1
    }
}

impl fmt::Display for CommandFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` failed with {}", self.command, self.status)
    }
}

impl std::error::Error for CommandFailed {}

/// Run `<swift> <action> <options>`, inheriting environment and stdio.
pub fn run(action: Action, options: &BuildOptions) -> Result<()> {
    let invocation = Invocation::action(action, options);
    println!("{}", invocation);

    let status = invocation
        .command()
        .status()
        .with_context(|| format!("Failed to run {}", invocation.program.display()))?;
    tracing::debug!(%status, "package manager exited");

    if !status.success() {
        return Err(CommandFailed {
            command: invocation.to_string(),
            status,
        }
        .into());
    }
    Ok(())
}

/// Ask the package manager where it puts build products.
pub fn capture_bin_path(options: &BuildOptions) -> Result<PathBuf> {
    let invocation = Invocation::show_bin_path(options);
    tracing::debug!(command = %invocation, "querying bin path");

    let output = invocation
        .command()
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to run {}", invocation.program.display()))?;

    if !output.status.success() {
        return Err(CommandFailed {
            command: invocation.to_string(),
            status: output.status,
        }
        .into());
    }

    match bin_path_from_stdout(&output.stdout)? {
        Some(bin_path) => Ok(bin_path),
        None => anyhow::bail!("`{}` printed no bin path", invocation),
    }
}

/// Trimmed stdout as a path, or `None` when only whitespace was printed.
fn bin_path_from_stdout(stdout: &[u8]) -> Result<Option<PathBuf>> {
    let trimmed = stdout.trim_ascii();
    if trimmed.is_empty() {
        return Ok(None);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Ok(Some(PathBuf::from(std::ffi::OsStr::from_bytes(trimmed))))
    }

    #[cfg(not(unix))]
    {
        let path = std::str::from_utf8(trimmed).context("Bin path is not valid UTF-8")?;
        Ok(Some(PathBuf::from(path)))
    }
}
