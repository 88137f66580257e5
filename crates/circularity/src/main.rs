// crates/circularity/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::analyze::AnalyzeArgs;
use commands::processes::ProcessesArgs;
use config::{AppConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Material circularity indicators for product systems", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to $CIRCULARITY_CONFIG when set)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the circularity indicators of a product system table
    Analyze(AnalyzeArgs),
    /// List the processes and normalized flows of a table
    Processes(ProcessesArgs),
    /// Print the supported unit catalog
    Units,
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Command::Analyze(args) => commands::analyze::run(args, &config),
        Command::Processes(args) => commands::processes::run(args, &config),
        Command::Units => {
            commands::units::run();
            Ok(())
        }
    }
}
