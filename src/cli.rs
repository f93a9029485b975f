use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "converge")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Idempotent runit service and xbps package agents", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge a runit service (enable/disable, start/stop/restart/reload)
    Service(ServiceArgs),

    /// Converge xbps packages (present/absent/latest/query)
    Package(PackageArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every agent
#[derive(Args)]
pub struct RunArgs {
    /// Argument record file (JSON, or TOML for *.toml); `-` or absent reads JSON from stdin
    #[arg(short, long, value_name = "PATH")]
    pub args: Option<PathBuf>,

    /// Plan and report without changing anything (forces dry_run)
    #[arg(long)]
    pub check: bool,

    /// Output format for the result record
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ServiceArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Pause after start/stop/restart before re-checking, in milliseconds
    #[arg(long, value_name = "MS")]
    pub grace_ms: Option<u64>,
}

#[derive(Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON result record
    Json,
    /// Coloured human summary
    Text,
}
