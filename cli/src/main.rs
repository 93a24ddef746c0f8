//! fcfg - compare FC/FG device collections from the command line.
//!
//! Reads project or device-array JSON files, runs the reconciliation engine
//! and prints the result as JSON on stdout. Logs go to stderr.

use clap::Parser;
use fcfg_cli::commands::{self, Commands};
use fcfg_cli::{AppError, Config};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// FC/FG device reconciliation
#[derive(Parser)]
#[command(name = "fcfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print compact JSON regardless of FCFG_PRETTY
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcfg_cli=info,fcfg_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let config = Config::from_env()?;
    let output = commands::run(cli.command, &config).await?;
    commands::render(&output, config.pretty && !cli.compact)
}
