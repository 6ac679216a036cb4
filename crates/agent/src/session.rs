//! The session controller: one conversation, one turn at a time.
//!
//! ```text
//! Idle → AwaitingInput → Routing → Composing → Invoking → Persisting → AwaitingInput
//!                ↘ Cleared ↗
//! ```
//!
//! The session owns the live history. Every turn appends the user message,
//! appends the assistant's answer, then writes the whole log through the
//! [`HistoryStore`]. The reference document and reference dataset are read
//! once in [`Session::start`] and never change afterwards.

use crate::invoker::AssistantInvoker;
use crate::prompt::PromptContext;
use crate::router::route;
use thiserror::Error;
use tracing::{debug, error, info};
use uniassist_core::assistant::AssistantKind;
use uniassist_core::document::DocumentSource;
use uniassist_core::error::HistoryError;
use uniassist_core::history::HistoryStore;
use uniassist_core::message::{Message, render_transcript};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingInput,
    Routing,
    Composing,
    Invoking,
    Persisting,
    Cleared,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Failed to extract text from the document at {location}")]
    DocumentUnavailable { location: String },

    #[error("Failed to load conversation history: {0}")]
    HistoryUnavailable(HistoryError),

    /// The store rejected the write. For a turn, `outcome` still carries the
    /// answer so it can be shown; it is `None` when a clear failed.
    #[error("Failed to save conversation history: {source}")]
    Persist {
        source: HistoryError,
        outcome: Option<TurnOutcome>,
    },
}

impl SessionError {
    /// The answer produced before the error, if the turn got that far.
    pub fn outcome(&self) -> Option<&TurnOutcome> {
        match self {
            Self::Persist { outcome, .. } => outcome.as_ref(),
            _ => None,
        }
    }
}

/// The result of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub kind: AssistantKind,
    pub response: String,
}

pub struct Session {
    state: SessionState,
    document_text: String,
    reference_text: String,
    history: Vec<Message>,
    store: Box<dyn HistoryStore>,
    invoker: AssistantInvoker,
}

impl Session {
    /// Load the document, the reference dataset and the stored history,
    /// then wait for input.
    ///
    /// Fails without touching the store when the document yields no text.
    pub async fn start(
        document: &dyn DocumentSource,
        store: Box<dyn HistoryStore>,
        reference: &[Message],
        invoker: AssistantInvoker,
    ) -> Result<Self, SessionError> {
        let document_text = uniassist_document::load_document_text(document);
        if document_text.is_empty() {
            return Err(SessionError::DocumentUnavailable {
                location: document.location(),
            });
        }

        let history = store
            .load()
            .await
            .map_err(SessionError::HistoryUnavailable)?;

        info!(
            store = store.name(),
            history = history.len(),
            reference = reference.len(),
            "Session started"
        );

        Ok(Self {
            state: SessionState::AwaitingInput,
            document_text,
            reference_text: render_transcript(reference),
            history,
            store,
            invoker,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Run one turn for `message`.
    ///
    /// Empty (or whitespace-only) input is rejected and changes nothing.
    /// A persistence failure is returned as [`SessionError::Persist`] carrying
    /// the answer; the turn's two messages stay in memory.
    pub async fn submit(&mut self, message: &str) -> Result<TurnOutcome, SessionError> {
        if message.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.state = SessionState::Routing;
        self.history.push(Message::user(message));
        let kind = route(message);
        info!(kind = %kind, "Routed message");

        self.state = SessionState::Composing;
        let history_text = render_transcript(&self.history);
        let ctx = PromptContext {
            document_text: &self.document_text,
            reference_text: &self.reference_text,
            history_text: &history_text,
            user_message: message,
        };

        self.state = SessionState::Invoking;
        let response = self.invoker.respond(kind, &ctx).await;
        self.history.push(Message::assistant(response.as_str()));

        self.state = SessionState::Persisting;
        let saved = self.store.save(&self.history).await;
        self.state = SessionState::AwaitingInput;

        let outcome = TurnOutcome { kind, response };
        if let Err(source) = saved {
            error!(error = %source, "Failed to persist history");
            return Err(SessionError::Persist {
                source,
                outcome: Some(outcome),
            });
        }

        debug!(messages = self.history.len(), "Turn complete");
        Ok(outcome)
    }

    /// Empty the conversation in memory and on disk.
    pub async fn clear(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Cleared;
        self.history.clear();
        self.invoker.reset();

        let cleared = self.store.clear().await;
        self.state = SessionState::AwaitingInput;
        cleared.map_err(|source| SessionError::Persist {
            source,
            outcome: None,
        })?;

        info!("History cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedProvider;
    use async_trait::async_trait;
    use std::sync::Arc;
    use uniassist_config::AppConfig;
    use uniassist_core::error::{DocumentError, ToolError};
    use uniassist_core::fetch::PageFetcher;
    use uniassist_history::InMemoryStore;

    struct Doc(&'static str);

    impl DocumentSource for Doc {
        fn location(&self) -> String {
            "DIU.pdf".into()
        }
        fn extract_text(&self) -> Result<String, DocumentError> {
            Ok(self.0.into())
        }
    }

    struct NoFetch;

    #[async_trait]
    impl PageFetcher for NoFetch {
        async fn fetch(&self, _url: &str) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    fn invoker(provider: Arc<ScriptedProvider>) -> AssistantInvoker {
        AssistantInvoker::from_config(&AppConfig::default(), provider, "m", Arc::new(NoFetch))
    }

    #[tokio::test]
    async fn empty_message_changes_nothing() {
        let store = InMemoryStore::new();
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let mut session = Session::start(
            &Doc("handbook"),
            Box::new(store.clone()),
            &[],
            invoker(provider.clone()),
        )
        .await
        .unwrap();

        assert!(matches!(
            session.submit("   \n").await,
            Err(SessionError::EmptyMessage)
        ));
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert_eq!(store.save_count(), 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn history_includes_current_message_in_prompt() {
        let store = InMemoryStore::with_messages(vec![
            Message::user("hi"),
            Message::assistant("Hello!"),
        ]);
        let provider = Arc::new(ScriptedProvider::texts(&["Semester starts in May."]));
        let mut session = Session::start(
            &Doc("handbook"),
            Box::new(store),
            &[Message::user("old"), Message::assistant("answer")],
            invoker(provider.clone()),
        )
        .await
        .unwrap();

        let outcome = session.submit("When does the semester start?").await.unwrap();
        assert_eq!(outcome.kind, AssistantKind::General);

        let prompt = provider.last_request().unwrap().messages.last().unwrap().content.clone();
        assert!(prompt.contains(
            "previous discussions:\nUser: hi\nAssistant: Hello!\nUser: When does the semester start?\n\n"
        ));
        assert!(prompt.contains("Here is the relevant data:\nUser: old\nAssistant: answer\n\n"));
    }

    #[tokio::test]
    async fn blank_document_fails_start() {
        let result = Session::start(
            &Doc("  "),
            Box::new(InMemoryStore::new()),
            &[],
            invoker(Arc::new(ScriptedProvider::new(vec![]))),
        )
        .await;
        assert!(matches!(
            result,
            Err(SessionError::DocumentUnavailable { ref location }) if location == "DIU.pdf"
        ));
    }
}
