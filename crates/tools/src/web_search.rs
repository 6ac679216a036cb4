//! Web search tool: DuckDuckGo Instant Answer lookups.
//!
//! Returns the abstract (when there is one) followed by related topics as
//! title / URL / snippet triples.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use uniassist_core::error::ToolError;
use uniassist_core::tool::{Tool, ToolResult};

const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com/";

pub struct WebSearchTool {
    client: reqwest::Client,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the tool at a different Instant Answer compatible endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information. Returns a list of relevant results with titles, URLs, and snippets."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results to return (default 5)",
                    "default": 5
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let num_results = arguments["num_results"].as_u64().unwrap_or(5).clamp(1, 10) as usize;

        debug!(query, num_results, "Running web search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "web_search".into(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ToolError::HttpStatus {
                url: self.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ToolError::ExecutionFailed {
                    tool_name: "web_search".into(),
                    reason: format!("Failed to parse search response: {e}"),
                })?;

        let results = parse_instant_answer(&body, num_results);
        let output = if results.is_empty() {
            format!("No results found for '{query}'.")
        } else {
            serde_json::to_string_pretty(&results).unwrap_or_default()
        };

        Ok(ToolResult::text(output))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Flatten an Instant Answer payload into at most `limit` results.
fn parse_instant_answer(body: &serde_json::Value, limit: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    let abstract_text = body["AbstractText"].as_str().unwrap_or_default();
    if !abstract_text.is_empty() {
        results.push(SearchResult {
            title: body["Heading"].as_str().unwrap_or_default().to_string(),
            url: body["AbstractURL"].as_str().unwrap_or_default().to_string(),
            snippet: abstract_text.to_string(),
        });
    }

    let empty = Vec::new();
    let topics = body["RelatedTopics"].as_array().unwrap_or(&empty);
    for topic in topics {
        // Grouped topics nest their entries one level down
        let entries = match topic["Topics"].as_array() {
            Some(nested) => nested.iter().collect::<Vec<_>>(),
            None => vec![topic],
        };
        for entry in entries {
            if let (Some(text), Some(url)) = (entry["Text"].as_str(), entry["FirstURL"].as_str()) {
                let title = text.split(" - ").next().unwrap_or(text).to_string();
                results.push(SearchResult {
                    title,
                    url: url.to_string(),
                    snippet: text.to_string(),
                });
            }
        }
    }

    results.truncate(limit);
    results
}
