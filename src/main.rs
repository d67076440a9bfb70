use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod ai;
mod checkpoint;
mod cli;
mod command;
mod context;
mod discovery;
mod error;
mod fileio;
mod install;
mod locales;
mod patch;
mod pipeline;
mod prompt;
mod worker;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => command::run_pipeline(args).await,
        Commands::Status { checkpoint_file } => command::run_status(checkpoint_file),
        Commands::Reset { checkpoint_file } => command::run_reset(checkpoint_file),
    }
}
