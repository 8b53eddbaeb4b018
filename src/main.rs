use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod config;
mod swiftpm;

use config::{Action, BuildOptions, InstallOptions};
use swiftpm::process::CommandFailed;

#[derive(Parser)]
#[command(name = "swiftpm-helper")]
#[command(about = "Build and test a Swift package with the package manager from a given toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the package
    Build(CommonArgs),
    /// Test the package
    Test(CommonArgs),
    /// Print the directory build products are written to
    BinPath(CommonArgs),
    /// Copy built products into a directory
    Install {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory to install products into
        #[arg(long, value_name = "PATH")]
        install_dir: PathBuf,

        /// Product to install (may be repeated)
        #[arg(long = "product", value_name = "NAME", default_value = "swift-driver")]
        products: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory of the package to build
    #[arg(long, value_name = "PATH", default_value = ".")]
    package_path: PathBuf,

    /// Build using the toolchain at PATH
    #[arg(long, value_name = "PATH")]
    toolchain: PathBuf,

    /// Build in the given path
    #[arg(long, value_name = "PATH", default_value = ".build")]
    build_path: PathBuf,

    /// Build using configuration (release|debug)
    #[arg(short, long, default_value = "debug")]
    configuration: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl CommonArgs {
    fn into_options(self) -> Result<BuildOptions> {
        BuildOptions::from_args(
            &self.package_path,
            &self.toolchain,
            &self.build_path,
            self.configuration,
            self.verbose,
        )
    }
}

/// Helper diagnostics are controlled by `RUST_LOG` only; `--verbose` belongs
/// to the package manager.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Build(common) => swiftpm::run(Action::Build, &common.into_options()?)?,
        Commands::Test(common) => swiftpm::run(Action::Test, &common.into_options()?)?,
        Commands::BinPath(common) => {
            let bin_path = swiftpm::bin_path(&common.into_options()?)?;
            println!("{}", bin_path.display());
        }
        Commands::Install {
            common,
            install_dir,
            products,
        } => {
            let build = common.into_options()?;
            let install_dir = config::absolutize(&install_dir, &std::env::current_dir()?);
            swiftpm::install(&InstallOptions {
                build,
                install_dir,
                products,
            })?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        // The package manager already reported its own failure
        Err(err) => match err.downcast_ref::<CommandFailed>() {
            Some(failed) => ExitCode::from(failed.exit_code()),
            None => {
                eprintln!("Error: {:?}", err);
                ExitCode::FAILURE
            }
        },
    }
}
