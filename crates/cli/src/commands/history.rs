//! `uniassist history`: Print the saved conversation.

use std::path::Path;
use uniassist_core::history::HistoryStore;
use uniassist_core::message::{Message, Role};
use uniassist_history::JsonFileStore;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = JsonFileStore::new(&config.paths.history);
    let messages = store.load().await?;

    if messages.is_empty() {
        println!("No conversation history.");
        return Ok(());
    }

    for message in &messages {
        println!("{}", display_line(message));
    }

    Ok(())
}

/// `You: ...` for the user, `Assistant: ...` for replies.
fn display_line(message: &Message) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    format!("{who}: {}", message.message)
}
