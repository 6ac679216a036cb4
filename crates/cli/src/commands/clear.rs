//! `uniassist clear`: Erase the saved conversation.

use std::path::Path;
use uniassist_core::history::HistoryStore;
use uniassist_history::JsonFileStore;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let store = JsonFileStore::new(&config.paths.history);
    store.clear().await?;
    println!("Chat history cleared!");
    Ok(())
}
