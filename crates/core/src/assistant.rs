//! Assistant kinds and their behavioral profiles.

use serde::{Deserialize, Serialize};

/// Which of the purpose-built assistants handles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantKind {
    /// Q&A over the reference document and past data
    General,
    /// Professional email drafting
    Email,
    /// Job-listing search against the configured portal
    JobSearch,
}

impl AssistantKind {
    pub const ALL: [AssistantKind; 3] = [
        AssistantKind::General,
        AssistantKind::Email,
        AssistantKind::JobSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantKind::General => "general",
            AssistantKind::Email => "email",
            AssistantKind::JobSearch => "job_search",
        }
    }

    /// Short progress label shown while the turn is in flight.
    pub fn progress_label(&self) -> &'static str {
        match self {
            AssistantKind::General => "Processing your question...",
            AssistantKind::Email => "Generating your email...",
            AssistantKind::JobSearch => "Searching for updates...",
        }
    }
}

impl std::fmt::Display for AssistantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavioral configuration for one assistant.
///
/// The three assistants share one implementation and differ only in this
/// profile plus the tools they are handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantProfile {
    pub kind: AssistantKind,

    /// Display name (e.g., "UniAssist")
    pub name: String,

    /// One-line role statement
    pub role: String,

    pub description: String,

    /// Behavioral instructions, rendered as a numbered list
    #[serde(default)]
    pub instructions: Vec<String>,

    /// Replay this assistant's own earlier exchanges into each request
    #[serde(default = "default_true")]
    pub add_history_to_messages: bool,

    /// Prefix answers with a trace of the tool calls that produced them
    #[serde(default = "default_true")]
    pub show_tool_calls: bool,

    /// Ask the model to format answers as markdown
    #[serde(default = "default_true")]
    pub markdown: bool,
}

fn default_true() -> bool {
    true
}

impl AssistantProfile {
    /// Assemble the system prompt sent ahead of every request.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {}. {}\n\n{}", self.name, self.role, self.description);

        if !self.instructions.is_empty() {
            prompt.push_str("\n\n## Instructions\n");
            for (i, instruction) in self.instructions.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, instruction));
            }
        }

        if self.markdown {
            prompt.push_str("\nUse markdown to format your answers.");
        }

        prompt.trim_end().to_string()
    }
}
