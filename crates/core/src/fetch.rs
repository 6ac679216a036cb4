//! Page fetching: raw text retrieval used while composing prompts.

use crate::error::ToolError;
use async_trait::async_trait;

/// Fetches a URL and returns its readable text.
///
/// The job-search flow calls this *before* the assistant runs, so a failure
/// here ends the turn without a model call.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, ToolError>;
}
