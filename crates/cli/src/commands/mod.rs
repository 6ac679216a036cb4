//! Subcommand implementations and the wiring they share.

pub mod chat;
pub mod clear;
pub mod doctor;
pub mod history;
pub mod onboard;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use uniassist_agent::{AssistantInvoker, Session};
use uniassist_config::AppConfig;
use uniassist_core::fetch::PageFetcher;
use uniassist_history::{JsonFileStore, ReferenceDataset};
use uniassist_tools::HttpPageFetcher;

/// Where the config file lives: `--config`, or the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load the config file and apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = config_path(explicit);
    let config =
        AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(config)
}

/// Wire providers, tools and stores from `config` and start a session.
pub async fn start_session(config: &AppConfig) -> Result<Session, Box<dyn std::error::Error>> {
    let router = uniassist_providers::build_from_config(config);
    let provider = router.default().ok_or("No default provider configured")?;
    let model = uniassist_providers::resolve_model(config);

    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpPageFetcher::new(config.job_search.fetch_timeout_secs));
    let invoker = AssistantInvoker::from_config(config, provider, &model, fetcher);

    let document = uniassist_document::open(&config.paths.document)?;
    let reference = ReferenceDataset::load_or_empty(&config.paths.reference_dataset).await;
    let store = JsonFileStore::new(&config.paths.history);

    let session = Session::start(
        document.as_ref(),
        Box::new(store),
        reference.messages(),
        invoker,
    )
    .await?;

    Ok(session)
}
