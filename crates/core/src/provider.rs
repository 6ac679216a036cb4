//! The language-model port.
//!
//! Assistants build a [`ProviderRequest`] from their instructions, replayed
//! exchanges and the composed prompt, and get back one [`ProviderResponse`].
//! Which backend answers is decided once, from config, in the providers crate.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who authored a message in a provider exchange.
///
/// Wider than [`crate::Role`]: system instructions and tool results are sent
/// to the model but never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,

    /// Set on assistant messages that ask for tools
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// Set on tool messages; the id of the call being answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::Assistant, content)
    }

    /// Output of tool call `call_id`, fed back on the next round trip.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            ..Self::plain(ChatRole::Tool, content)
        }
    }
}

/// A tool invocation as the model emitted it. `arguments` is the raw JSON
/// text; [`crate::ToolCall`] holds the parsed form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// e.g. "llama-3.3-70b-versatile"
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Empty when the assistant has no tools
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

fn default_temperature() -> f32 {
    0.7
}

/// What the model is told about one tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,

    /// JSON Schema for the arguments object
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub message: ChatMessage,

    /// Absent when the backend does not report usage
    pub usage: Option<Usage>,

    /// Model that answered, as reported by the backend
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend name for logs, e.g. "groq".
    fn name(&self) -> &str;

    /// One non-streaming completion.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }

    /// Whether the backend is reachable with the configured key.
    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}
