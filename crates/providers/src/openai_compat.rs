//! Chat-completions client for OpenAI-compatible endpoints.
//!
//! Groq is the default target, but anything serving `/chat/completions`
//! and `/models` with bearer auth works (OpenAI, OpenRouter, Ollama, vLLM).
//! Requests are built from borrowed wire structs so a turn's messages are
//! serialized straight from the caller's request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use uniassist_core::error::ProviderError;
use uniassist_core::provider::{
    ChatMessage, ChatRole, MessageToolCall, Provider, ProviderRequest, ProviderResponse,
    ToolDefinition, Usage,
};

const REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Groq's OpenAI-compatible endpoint.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new("groq", "https://api.groq.com/openai/v1", api_key)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn wire_request<'a>(request: &'a ProviderRequest) -> WireRequest<'a> {
        WireRequest {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            tools: request.tools.iter().map(WireTool::from).collect(),
            stream: false,
        }
    }

    fn into_response(reply: WireReply) -> Result<ProviderResponse, ProviderError> {
        let Some(choice) = reply.choices.into_iter().next() else {
            return Err(ProviderError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            });
        };

        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|tc| MessageToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        let mut message = ChatMessage::assistant(choice.message.content.unwrap_or_default());
        message.tool_calls = tool_calls;

        Ok(ProviderResponse {
            message,
            usage: reply.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            model: reply.model,
        })
    }

    /// Map a non-success status to the matching provider error.
    async fn status_error(response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        match status {
            429 => ProviderError::RateLimited {
                retry_after_secs: response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            401 | 403 => ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ),
            _ => {
                let body = response.text().await.unwrap_or_default();
                warn!(status, body = %body, "Provider returned error");
                ProviderError::ApiError {
                    status_code: status,
                    message: error_message(&body),
                }
            }
        }
    }

    async fn get_models(&self) -> Result<reqwest::Response, ProviderError> {
        self.client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<WireErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        debug!(
            provider = %self.name,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&Self::wire_request(&request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let reply: WireReply = response.json().await.map_err(|e| ProviderError::ApiError {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        Self::into_response(reply)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self.get_models().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let listing: WireModelList = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(listing.data.into_iter().map(|m| m.id).collect())
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let response = self.get_models().await?;
        match response.status().as_u16() {
            401 | 403 => Err(Self::status_error(response).await),
            _ => Ok(response.status().is_success()),
        }
    }
}

// --- Wire types ---

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: ChatRole,
    content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCallOut<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(m: &'a ChatMessage) -> Self {
        Self {
            role: m.role,
            content: &m.content,
            tool_calls: m
                .tool_calls
                .iter()
                .map(|tc| WireToolCallOut {
                    id: &tc.id,
                    kind: "function",
                    function: WireFunctionOut {
                        name: &tc.name,
                        arguments: &tc.arguments,
                    },
                })
                .collect(),
            tool_call_id: m.tool_call_id.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct WireToolCallOut<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionOut<'a>,
}

#[derive(Serialize)]
struct WireFunctionOut<'a> {
    name: &'a str,
    arguments: &'a str,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireToolSpec<'a>,
}

#[derive(Serialize)]
struct WireToolSpec<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

impl<'a> From<&'a ToolDefinition> for WireTool<'a> {
    fn from(t: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireToolSpec {
                name: &t.name,
                description: &t.description,
                parameters: &t.parameters,
            },
        }
    }
}

#[derive(Deserialize)]
struct WireReply {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireReplyMessage,
}

#[derive(Deserialize)]
struct WireReplyMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCallIn>,
}

#[derive(Deserialize)]
struct WireToolCallIn {
    id: String,
    function: WireFunctionIn,
}

#[derive(Deserialize)]
struct WireFunctionIn {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct WireModelList {
    data: Vec<WireModel>,
}

#[derive(Deserialize)]
struct WireModel {
    id: String,
}

#[derive(Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Deserialize)]
struct WireErrorDetail {
    message: String,
}
