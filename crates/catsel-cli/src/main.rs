//! catsel - offline bundle selection

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catsel_cli::{Cli, Commands, cmd};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Select(args) => cmd::select::select(&args),
        Commands::Conditions { values } => cmd::conditions::conditions(&values),
    }
}
