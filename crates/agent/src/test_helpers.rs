//! Shared test helpers: a provider that replays a script.

use std::sync::Mutex;
use uniassist_core::error::ProviderError;
use uniassist_core::provider::{
    ChatMessage, MessageToolCall, Provider, ProviderRequest, ProviderResponse, Usage,
};

/// A mock provider that returns scripted responses in order and records
/// every request it receives.
///
/// Panics if more calls are made than responses provided.
pub struct ScriptedProvider {
    responses: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that answers each call with the next plain text.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(text_response(t))).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            panic!("ScriptedProvider: no more responses (call #{})", requests.len());
        }
        requests.push(request);
        responses.remove(0)
    }
}

/// A plain text response (no tool calls).
pub fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: ChatMessage::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "scripted-model".into(),
    }
}

/// A response requesting a single tool call.
pub fn tool_call_response(id: &str, name: &str, arguments: &str) -> ProviderResponse {
    let mut message = ChatMessage::assistant("");
    message.tool_calls = vec![MessageToolCall {
        id: id.into(),
        name: name.into(),
        arguments: arguments.into(),
    }];
    ProviderResponse {
        message,
        usage: None,
        model: "scripted-model".into(),
    }
}
