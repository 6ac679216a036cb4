//! UniAssist CLI: the main entry point.
//!
//! Commands:
//! - `chat`: Interactive chat or single-message mode (default)
//! - `history`: Print the saved conversation
//! - `clear`: Erase the saved conversation
//! - `onboard`: Write a default config file
//! - `doctor`: Diagnose configuration and connectivity

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod console;

#[derive(Parser)]
#[command(
    name = "uniassist",
    about = "UniAssist — DIU questions, email drafting and job search",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Use this config file instead of ~/.uniassist/config.toml
    #[arg(long, global = true, env = "UNIASSIST_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with UniAssist
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print the saved conversation
    History,

    /// Erase the saved conversation
    Clear,

    /// Write a default configuration file
    Onboard,

    /// Diagnose configuration, files and provider connectivity
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let logs = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Chat { message: None }) {
        Commands::Chat { message } => commands::chat::run(config_path, message).await?,
        Commands::History => commands::history::run(config_path).await?,
        Commands::Clear => commands::clear::run(config_path).await?,
        Commands::Onboard => commands::onboard::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
    }

    Ok(())
}
