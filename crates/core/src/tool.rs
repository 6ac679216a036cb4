//! Tools an assistant may call while answering.
//!
//! The general assistant searches the web, the email assistant can send the
//! draft it wrote, the job-search assistant reads pages and searches. Each
//! assistant owns a [`ToolRegistry`] holding only its own tools.

use crate::error::ToolError;
use crate::provider::{MessageToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tool invocation requested by the model, with parsed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl From<&MessageToolCall> for ToolCall {
    /// Arguments that are not valid JSON become `null`; the tool then
    /// reports its own missing-parameter error back to the model.
    fn from(call: &MessageToolCall) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: serde_json::from_str(&call.arguments).unwrap_or_default(),
        }
    }
}

/// Text handed back to the model for one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Filled in by the registry once the call has run
    #[serde(default)]
    pub call_id: String,

    pub output: String,
}

impl ToolResult {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            call_id: String::new(),
            output: output.into(),
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls the tool by (e.g. "web_page", "send_email").
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments object.
    fn parameters_schema(&self) -> serde_json::Value;

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Tools keyed by name. Iteration is by name, so the definitions sent to
/// the model do not shuffle between turns.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tool`, replacing any tool already registered under its name.
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Run `call` against the matching tool and stamp the result with its id.
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.get(&call.name) else {
            return Err(ToolError::NotFound(call.name.clone()));
        };

        let result = tool.execute(call.arguments.clone()).await?;
        Ok(ToolResult {
            call_id: call.id.clone(),
            ..result
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
