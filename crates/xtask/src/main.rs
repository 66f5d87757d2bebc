//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{CheckContent, Locations, Simulate};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the tactical battle engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a scenario or location headlessly and print the combat log
    Simulate(Simulate),

    /// Load every bundled content file and start each scenario
    CheckContent(CheckContent),

    /// List world-map locations and their danger
    Locations(Locations),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckContent(cmd) => cmd.execute(),
        Command::Locations(cmd) => cmd.execute(),
    }
}
