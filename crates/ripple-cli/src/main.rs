//! Ripple CLI - Command-line interface for gear ripple analysis.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(author, version, about = "Gear flank ripple analysis", long_about = None)]
struct Cli {
    /// Log pipeline details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a measurement job
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show gear and trace summary of a measurement job
    Info(commands::info::InfoArgs),

    /// Write a synthetic measurement job
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
