//! Web page reader: fetches a URL over HTTP and reduces it to readable text.
//!
//! Used two ways: directly by the job-search flow (through [`PageFetcher`])
//! to pull the portal page before the assistant runs, and as the
//! `web_page` tool the job-search assistant may call on its own.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uniassist_core::error::ToolError;
use uniassist_core::fetch::PageFetcher;
use uniassist_core::tool::{Tool, ToolResult};

/// A [`PageFetcher`] backed by `reqwest`.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpPageFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("uniassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            timeout_secs,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolError::InvalidArguments(
                "URL must start with http:// or https://".into(),
            ));
        }

        debug!(url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ToolError::Timeout {
                    tool_name: "web_page".into(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                ToolError::ExecutionFailed {
                    tool_name: "web_page".into(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("html"));

        let body = response
            .text()
            .await
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "web_page".into(),
                reason: format!("Failed to read response body: {e}"),
            })?;

        Ok(if is_html { html_to_text(&body) } else { body })
    }
}

/// Strip markup from an HTML document, leaving its visible text.
///
/// Script and style bodies and comments are dropped, the common entities
/// are decoded, and whitespace runs collapse to a single space.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        out.push(' ');

        let tag = &rest[start..];
        let head = tag.get(..7).unwrap_or(tag).to_ascii_lowercase();
        let skip = if head.starts_with("<script") {
            end_of(tag, "</script>")
        } else if head.starts_with("<style") {
            end_of(tag, "</style>")
        } else if tag.starts_with("<!--") {
            tag.find("-->").map(|i| i + 3)
        } else {
            tag.find('>').map(|i| i + 1)
        };

        rest = match skip {
            Some(n) => &tag[n..],
            None => "",
        };
    }
    out.push_str(rest);

    decode_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte offset just past the (case-insensitive) `closing` tag.
fn end_of(s: &str, closing: &str) -> Option<usize> {
    s.to_ascii_lowercase()
        .find(closing)
        .map(|i| i + closing.len())
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// The `web_page` tool: read a URL and return its text.
pub struct WebPageTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl WebPageTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Tool for WebPageTool {
    fn name(&self) -> &str {
        "web_page"
    }

    fn description(&self) -> &str {
        "Read a web page and return its visible text. Use this to retrieve data \
         from job portals when a relevant URL is known."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL of the page to read"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let url = arguments["url"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'url' argument".into()))?;

        let text = self.fetcher.fetch(url).await?;
        Ok(ToolResult::text(text))
    }
}
