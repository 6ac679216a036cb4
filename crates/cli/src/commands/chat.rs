//! `uniassist chat`: Interactive or single-message chat mode.

use crate::console::{self, ConsoleInput};
use std::io::Write;
use std::path::Path;
use uniassist_agent::{Session, SessionError, TurnOutcome, route};
use uniassist_config::AppConfig;

pub async fn run(
    config_path: Option<&Path>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    // Check for an API key before starting anything
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables (or put it in .env):");
        eprintln!("    GROQ_API_KEY      = 'gsk_...'   (recommended)");
        eprintln!("    UNIASSIST_API_KEY = '...'       (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", super::config_path(config_path).display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let mut session = super::start_session(&config)
        .await
        .map_err(|e| format!("Failed to start session: {e}"))?;

    match message {
        Some(msg) => match take_turn(&mut session, &msg).await {
            Ok(outcome) => println!("{}", outcome.response),
            Err(e) => {
                // An unsaved turn still has an answer worth printing
                if let Some(outcome) = e.outcome() {
                    println!("{}", outcome.response);
                }
                return Err(e.into());
            }
        },
        None => interactive(&mut session, &config).await?,
    }

    Ok(())
}

/// Run one turn, showing the assistant's progress label while it works.
async fn take_turn(session: &mut Session, message: &str) -> Result<TurnOutcome, SessionError> {
    let label = route(message).progress_label();
    eprint!("  {label}");
    let result = session.submit(message).await;
    eprint!("\r{}\r", " ".repeat(label.chars().count() + 2));
    result
}

fn show_response(outcome: &TurnOutcome) {
    println!();
    for line in outcome.response.lines() {
        println!("  Assistant > {line}");
    }
    println!();
}

const BANNER: [&str; 3] = [
    "╔══════════════════════════════════════════════╗",
    "║         UniAssist — Interactive Mode         ║",
    "╚══════════════════════════════════════════════╝",
];

async fn interactive(
    session: &mut Session,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    for line in BANNER {
        println!("  {line}");
    }
    println!();
    println!("  Welcome to UniAssist! I am here to assist you.");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", uniassist_providers::resolve_model(config));
    println!("  Document:  {}", config.paths.document.display());
    println!("  History:   {} messages", session.history().len());
    println!();
    println!("  Ask anything about DIU, mention \"email\" to draft one,");
    println!("  or \"job\" to search the job portal.");
    println!("  Type '/clear' to erase the history, 'exit' or Ctrl+D to quit.");
    println!();

    let mut rx = console::start();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(input) = rx.recv().await {
        match input {
            ConsoleInput::Clear => match session.clear().await {
                Ok(()) => println!("  Chat history cleared!"),
                Err(e) => eprintln!("  [Error] {e}"),
            },
            ConsoleInput::Message(text) => match take_turn(session, &text).await {
                Ok(outcome) => show_response(&outcome),
                Err(SessionError::EmptyMessage) => {}
                Err(e) => {
                    if let Some(outcome) = e.outcome() {
                        show_response(outcome);
                    }
                    eprintln!("  [Error] {e}");
                    println!();
                }
            },
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
