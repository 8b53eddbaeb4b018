use anyhow::{Context, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// What the package manager is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Build,
    Test,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options shared by every subcommand, with all paths made absolute
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub package_path: PathBuf,
    pub toolchain: PathBuf,
    pub build_path: PathBuf,
    pub configuration: String,
    pub verbose: bool,
}

impl BuildOptions {
    /// Canonicalize the given paths against the current working directory.
    pub fn from_args(
        package_path: &Path,
        toolchain: &Path,
        build_path: &Path,
        configuration: String,
        verbose: bool,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self {
            package_path: absolutize(package_path, &cwd),
            toolchain: absolutize(toolchain, &cwd),
            build_path: absolutize(build_path, &cwd),
            configuration,
            verbose,
        })
    }
}

/// Configuration for the install command
#[derive(Debug)]
pub struct InstallOptions {
    pub build: BuildOptions,
    pub install_dir: PathBuf,
    pub products: Vec<String>,
}

/// Make `path` absolute against `base` and fold away `.` and `..`.
///
/// Purely lexical: nothing is read from disk and symlinks are left alone, so
/// this cannot fail and the path does not need to exist.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            // `pop` is a no-op at the root, matching `/..` == `/`
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
