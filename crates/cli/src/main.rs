mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use diracweb_lib::compile::CompileError;

use cmd::{BuildArgs, cmd_compile, cmd_data_files, cmd_info, cmd_plan, cmd_plugins};
use output::{OutputFormat, print_error};

/// diracweb - compile web application bundles inside a container
#[derive(Parser)]
#[command(name = "diracweb")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format for listings
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile the package's web application in a container
  Compile {
    #[command(flatten)]
    build: BuildArgs,
  },

  /// Show the mounts and container command without running it
  Plan {
    #[command(flatten)]
    build: BuildArgs,

    /// Keep the staging root of an overlay backend so the printed command can be run
    #[arg(long)]
    keep_staging: bool,
  },

  /// List installed plugins contributing static resources
  Plugins {
    #[command(flatten)]
    build: BuildArgs,
  },

  /// List files to install, grouped by destination directory
  DataFiles {
    /// Directory to walk
    source: PathBuf,
    /// Install directory mirroring `source`
    dest: PathBuf,
  },

  /// Show backend, identity and plugin search path
  Info {
    #[command(flatten)]
    build: BuildArgs,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      failure_code(&err)
    }
  }
}

/// A failed build step exits with the container's own code; anything else with 1.
fn failure_code(err: &anyhow::Error) -> ExitCode {
  err
    .downcast_ref::<CompileError>()
    .and_then(CompileError::exit_code)
    .and_then(|code| u8::try_from(code).ok())
    .filter(|code| *code != 0)
    .map_or(ExitCode::FAILURE, ExitCode::from)
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Compile { build } => cmd_compile(&build),
    Commands::Plan { build, keep_staging } => cmd_plan(&build, keep_staging, cli.format),
    Commands::Plugins { build } => cmd_plugins(&build, cli.format),
    Commands::DataFiles { source, dest } => cmd_data_files(&source, &dest, cli.format),
    Commands::Info { build } => cmd_info(&build, cli.format),
  }
}
