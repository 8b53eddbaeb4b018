//! How a package manager command line is put together.
//!
//! Every command the helper runs is built here: the executable comes from the
//! toolchain and the trailing flags come from [`BuildOptions`]. The order of
//! the flags is fixed so printed command lines are reproducible.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{Action, BuildOptions};

/// The package manager binary, relative to a toolchain root
const SWIFT_SUBPATH: [&str; 3] = ["usr", "bin", "swift"];

/// Path to the `swift` executable inside `toolchain`.
pub fn swift_executable(toolchain: &Path) -> PathBuf {
    SWIFT_SUBPATH
        .iter()
        .fold(toolchain.to_path_buf(), |path, part| path.join(part))
}

/// Flags forwarded to every package manager invocation.
pub fn swiftpm_options(options: &BuildOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--package-path".into(),
        options.package_path.clone().into(),
        "--build-path".into(),
        options.build_path.clone().into(),
        "--configuration".into(),
        options.configuration.clone().into(),
    ];

    if options.verbose {
        args.push("--verbose".into());
    }

    args
}

/// A fully resolved command: executable plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `<swift> <action> <options>`
    pub fn action(action: Action, options: &BuildOptions) -> Self {
        let mut args = vec![OsString::from(action.as_str())];
        args.extend(swiftpm_options(options));
        Self {
            program: swift_executable(&options.toolchain),
            args,
        }
    }

    /// `<swift> build --show-bin-path <options>`
    pub fn show_bin_path(options: &BuildOptions) -> Self {
        let mut args = vec![
            OsString::from(Action::Build.as_str()),
            OsString::from("--show-bin-path"),
        ];
        args.extend(swiftpm_options(options));
        Self {
            program: swift_executable(&options.toolchain),
            args,
        }
    }

    /// A `Command` ready to spawn, inheriting the parent's environment.
    pub fn command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape_arg(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", escape_arg(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote an argument containing spaces or double quotes for display.
fn escape_arg(arg: &str) -> String {
    if arg.contains('"') || arg.contains(' ') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(verbose: bool) -> BuildOptions {
        BuildOptions {
            package_path: PathBuf::from("/src/pkg"),
            toolchain: PathBuf::from("/tc"),
            build_path: PathBuf::from("/src/pkg/.build"),
            configuration: "debug".to_string(),
            verbose,
        }
    }

    #[test]
    fn test_swift_executable_under_toolchain() {
        assert_eq!(
            swift_executable(Path::new("/tc")),
            Path::new("/tc").join("usr").join("bin").join("swift")
        );
    }

    #[test]
    fn test_options_order() {
        assert_eq!(
            swiftpm_options(&options(false)),
            [
                "--package-path",
                "/src/pkg",
                "--build-path",
                "/src/pkg/.build",
                "--configuration",
                "debug",
            ]
        );
    }

    #[test]
    fn test_verbose_flag_only_when_requested() {
        let quiet = swiftpm_options(&options(false));
        let loud = swiftpm_options(&options(true));

        assert!(!quiet.iter().any(|arg| arg == "--verbose"));
        assert_eq!(loud.len(), quiet.len() + 1);
        assert_eq!(loud.last().unwrap(), "--verbose");
        assert_eq!(&loud[..quiet.len()], &quiet[..]);
    }

    #[test]
    fn test_action_is_first_argument() {
        let build = Invocation::action(Action::Build, &options(false));
        let test = Invocation::action(Action::Test, &options(false));

        assert_eq!(build.program, PathBuf::from("/tc/usr/bin/swift"));
        assert_eq!(build.args[0], "build");
        assert_eq!(test.args[0], "test");
        assert_eq!(&build.args[1..], &test.args[1..]);
    }

    #[test]
    fn test_show_bin_path_invocation() {
        let invocation = Invocation::show_bin_path(&options(true));
        assert_eq!(
            invocation.to_string(),
            "/tc/usr/bin/swift build --show-bin-path --package-path /src/pkg \
             --build-path /src/pkg/.build --configuration debug --verbose"
        );
    }

    #[test]
    fn test_display_quotes_awkward_arguments() {
        let mut opts = options(false);
        opts.package_path = PathBuf::from("/My Packages/pkg");
        opts.configuration = "say\"what".to_string();
        let rendered = Invocation::action(Action::Build, &opts).to_string();

        assert!(rendered.contains("--package-path \"/My Packages/pkg\""));
        assert!(rendered.contains("--configuration \"say\\\"what\""));
    }
}
