//! Tool implementations for the UniAssist assistants.
//!
//! Each assistant gets its own registry:
//! - **general**: `web_search`
//! - **email**: `send_email`
//! - **job search**: `web_page`, `web_search`

pub mod email;
pub mod web_page;
pub mod web_search;

use std::sync::Arc;
use uniassist_config::AppConfig;
use uniassist_core::assistant::AssistantKind;
use uniassist_core::fetch::PageFetcher;
use uniassist_core::tool::ToolRegistry;

pub use email::EmailTool;
pub use web_page::{HttpPageFetcher, WebPageTool, html_to_text};
pub use web_search::WebSearchTool;

/// Build the tool registry for one assistant kind.
///
/// The job-search assistant's `web_page` tool shares `fetcher` with the
/// portal pre-fetch so both go through the same client.
pub fn registry_for(
    kind: AssistantKind,
    config: &AppConfig,
    fetcher: Arc<dyn PageFetcher>,
) -> ToolRegistry {
    match kind {
        AssistantKind::General => ToolRegistry::new().with(Box::new(WebSearchTool::new())),
        AssistantKind::Email => {
            ToolRegistry::new().with(Box::new(EmailTool::new(config.email.clone())))
        }
        AssistantKind::JobSearch => ToolRegistry::new()
            .with(Box::new(WebPageTool::new(fetcher)))
            .with(Box::new(WebSearchTool::new())),
    }
}
