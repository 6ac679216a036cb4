//! The assistant run loop.
//!
//! One [`Assistant`] type serves all three roles; the profile and the tool
//! registry are what make it the general, email or job-search assistant.
//!
//! Each run:
//! 1. **Build messages** (system prompt + replayed exchanges + the prompt)
//! 2. **Send to the model** with the profile's tool definitions
//! 3. **If tool calls**: execute them, append results, loop back to step 2
//! 4. **If text**: remember the exchange and return it

use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uniassist_core::assistant::AssistantProfile;
use uniassist_core::error::ProviderError;
use uniassist_core::provider::{ChatMessage, Provider, ProviderRequest};
use uniassist_core::tool::{ToolCall, ToolRegistry};

const MAX_ITERATIONS_REPLY: &str =
    "I've reached the maximum number of tool call iterations. Please provide further guidance.";

/// What one run produced.
#[derive(Debug, Clone)]
pub struct AssistantResponse {
    /// The answer text, prefixed with the tool-call trace when enabled
    pub content: String,

    /// Every tool call executed during the run, in order
    pub tool_calls: Vec<ToolCall>,
}

pub struct Assistant {
    profile: AssistantProfile,

    provider: Arc<dyn Provider>,

    model: String,

    temperature: f32,

    max_tokens: Option<u32>,

    tools: ToolRegistry,

    /// Maximum tool call iterations per run
    max_iterations: u32,

    /// How many earlier exchanges to replay
    history_turns: usize,

    /// Earlier (prompt, answer) pairs, oldest first
    exchanges: VecDeque<(String, String)>,
}

impl Assistant {
    pub fn new(
        profile: AssistantProfile,
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            profile,
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            tools,
            max_iterations: 10,
            history_turns: 3,
            exchanges: VecDeque::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    pub fn profile(&self) -> &AssistantProfile {
        &self.profile
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Forget every remembered exchange.
    pub fn reset(&mut self) {
        self.exchanges.clear();
    }

    fn initial_messages(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.profile.system_prompt())];

        if self.profile.add_history_to_messages {
            for (asked, answered) in &self.exchanges {
                messages.push(ChatMessage::user(asked.as_str()));
                messages.push(ChatMessage::assistant(answered.as_str()));
            }
        }

        messages.push(ChatMessage::user(prompt));
        messages
    }

    fn remember(&mut self, prompt: &str, answer: &str) {
        if !self.profile.add_history_to_messages || self.history_turns == 0 {
            return;
        }
        self.exchanges.push_back((prompt.to_string(), answer.to_string()));
        while self.exchanges.len() > self.history_turns {
            self.exchanges.pop_front();
        }
    }

    /// Run the assistant on `prompt` until it produces a text answer.
    pub async fn run(&mut self, prompt: &str) -> Result<AssistantResponse, ProviderError> {
        info!(
            assistant = %self.profile.name,
            kind = %self.profile.kind,
            replayed = self.exchanges.len(),
            "Running assistant"
        );

        let mut messages = self.initial_messages(prompt);
        let tool_definitions = self.tools.definitions();
        let mut executed: Vec<ToolCall> = Vec::new();
        let mut iteration = 0;

        let answer = loop {
            iteration += 1;

            if iteration > self.max_iterations {
                warn!(
                    assistant = %self.profile.name,
                    iterations = iteration,
                    "Max tool iterations reached, forcing text response"
                );
                break MAX_ITERATIONS_REPLY.to_string();
            }

            debug!(assistant = %self.profile.name, iteration, "Assistant loop iteration");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                debug!(
                    model = %response.model,
                    tokens = usage.total_tokens,
                    "Response generated"
                );
            }

            if response.message.tool_calls.is_empty() {
                break response.message.content;
            }

            debug!(
                tool_count = response.message.tool_calls.len(),
                "Executing tool calls"
            );

            let requested = response.message.tool_calls.clone();
            messages.push(response.message);

            for tc in &requested {
                let call = ToolCall::from(tc);

                let output = match self.tools.execute(&call).await {
                    Ok(result) => result.output,
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "Tool execution failed");
                        format!("Error: {e}")
                    }
                };

                messages.push(ChatMessage::tool_result(&tc.id, output));
                executed.push(call);
            }
        };

        self.remember(prompt, &answer);

        let content = if self.profile.show_tool_calls && !executed.is_empty() {
            format!("{}\n\n{answer}", tool_call_trace(&executed))
        } else {
            answer
        };

        Ok(AssistantResponse {
            content,
            tool_calls: executed,
        })
    }
}

/// One ``Running: `name(args)` `` line per executed call.
fn tool_call_trace(calls: &[ToolCall]) -> String {
    calls
        .iter()
        .map(|c| format!("Running: `{}({})`", c.name, render_arguments(&c.arguments)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render call arguments as `key=value` pairs.
fn render_arguments(arguments: &serde_json::Value) -> String {
    match arguments {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{k}={s}"),
                other => format!("{k}={other}"),
            })
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
