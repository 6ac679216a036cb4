//! Conversation message value objects.
//!
//! A [`Message`] is what the user sees and what gets persisted:
//! user types a question → session appends it → assistant answers → session appends the answer.
//! The on-disk shape is exactly `{"role": ..., "message": ...}`.

use serde::{Deserialize, Serialize};

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// One of the assistants
    Assistant,
}

impl Role {
    /// The role name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// The role name with its first letter upper-cased, used in transcripts.
    pub fn capitalized(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged entry in a conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub message: String,
}

impl Message {
    /// Create a new user message.
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
        }
    }

    /// Render as a single transcript line: `"User: hi"`.
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.role.capitalized(), self.message)
    }
}

/// Render a message list as newline-joined `"{Role}: {message}"` lines.
///
/// An empty list renders to the empty string.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}
