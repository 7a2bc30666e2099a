//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{config_cmd, report, tasks};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(author, version, about = "Turn a daily note checklist into a publishable work log")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the project or global one
    #[arg(long, global = true, env = "WORKLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the work log from a note
    ///
    /// Examples:
    ///   worklog report notes/2024-03-07.md
    ///   worklog report --date 2024-03-07 --copy
    ///   cat note.md | worklog report --stdin --heading "## Done"
    Report(report::ReportArgs),

    /// List the checklist items found under the heading
    Tasks(tasks::TasksArgs),

    /// Inspect and edit settings
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Installs the stderr log subscriber
///
/// `--verbose` forces debug logging for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("worklog_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = Output::new(cli.format);
    let config = Config::load(cli.config.as_deref())?;
    debug!(source = config.source.label(), "settings resolved");

    match cli.command {
        Commands::Report(args) => report::run(args, &config, &output)?,
        Commands::Tasks(args) => tasks::run(args, &config, &output)?,
        Commands::Config(cmd) => config_cmd::run(cmd, &config, &output)?,
    }

    debug!("command completed");
    Ok(())
}
