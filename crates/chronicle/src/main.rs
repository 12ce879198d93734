//! Chronicle - LLM timeline generator for dated content
//!
//! Main entry point for the Chronicle CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{config, generate};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Chronicle - LLM timeline generator for dated content
#[derive(Parser)]
#[command(name = "chronicle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User config directory (default: platform config dir)
    #[arg(long, global = true, env = "CHRONICLE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize dated content into a timeline
    Generate(generate::GenerateArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing — console on stderr (stdout carries JSON) + rotating JSON file
    let filter = if cli.verbose {
        "chronicle=debug,chronicle_timeline=debug,chronicle_llm=debug,chronicle_config=debug,info"
    } else {
        "chronicle=info,chronicle_timeline=info,chronicle_llm=info,warn"
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| filter.to_string());

    let log_dir = cli
        .config_dir
        .clone()
        .or_else(chronicle_config::xdg_config_dir)
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "chronicle.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "chronicle=trace,chronicle_timeline=trace,chronicle_llm=trace,chronicle_config=trace,info",
                )),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context {
        verbose: cli.verbose,
        config_dir: cli.config_dir,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate(args) => generate::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
