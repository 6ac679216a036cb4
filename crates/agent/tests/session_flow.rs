//! End-to-end session tests.
//!
//! These drive a full [`Session`] against a real JSON history file with a
//! scripted provider and stub page fetchers, checking what lands on disk
//! and what the model is asked.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uniassist_agent::{AssistantInvoker, Session, SessionError, SessionState};
use uniassist_config::AppConfig;
use uniassist_core::assistant::AssistantKind;
use uniassist_core::document::DocumentSource;
use uniassist_core::error::{DocumentError, HistoryError, ProviderError, ToolError};
use uniassist_core::fetch::PageFetcher;
use uniassist_core::history::HistoryStore;
use uniassist_core::message::{Message, Role};
use uniassist_core::provider::{ChatMessage, Provider, ProviderRequest, ProviderResponse};
use uniassist_history::JsonFileStore;

// ── Test doubles ─────────────────────────────────────────────────────────

/// Answers every call with `"answer {n}"` and records the last user prompt.
struct CountingProvider {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl Provider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_prompt.lock().unwrap() = request.messages.last().map(|m| m.content.clone());
        Ok(ProviderResponse {
            message: ChatMessage::assistant(format!("answer {n}")),
            usage: None,
            model: request.model,
        })
    }
}

struct StaticPage(String);

#[async_trait]
impl PageFetcher for StaticPage {
    async fn fetch(&self, _url: &str) -> Result<String, ToolError> {
        Ok(self.0.clone())
    }
}

struct BrokenPortal;

#[async_trait]
impl PageFetcher for BrokenPortal {
    async fn fetch(&self, _url: &str) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "web_page".into(),
            reason: "connection reset".into(),
        })
    }
}

struct TextDoc(&'static str);

impl DocumentSource for TextDoc {
    fn location(&self) -> String {
        "DIU.pdf".into()
    }

    fn extract_text(&self) -> Result<String, DocumentError> {
        Ok(self.0.into())
    }
}

struct MissingDoc;

impl DocumentSource for MissingDoc {
    fn location(&self) -> String {
        "DIU.pdf".into()
    }

    fn extract_text(&self) -> Result<String, DocumentError> {
        Err(DocumentError::Unreadable {
            path: "DIU.pdf".into(),
            reason: "file not found".into(),
        })
    }
}

/// A store whose saves always fail.
struct ReadOnlyDisk;

#[async_trait]
impl HistoryStore for ReadOnlyDisk {
    fn name(&self) -> &str {
        "read_only_disk"
    }

    async fn load(&self) -> Result<Vec<Message>, HistoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _messages: &[Message]) -> Result<(), HistoryError> {
        Err(HistoryError::Write {
            path: "conversation_history.json".into(),
            reason: "read-only file system".into(),
        })
    }
}

fn invoker(provider: Arc<CountingProvider>, fetcher: Arc<dyn PageFetcher>) -> AssistantInvoker {
    let mut config = AppConfig::default();
    config.assistant.show_tool_calls = false;
    AssistantInvoker::from_config(&config, provider, "test-model", fetcher)
}

async fn start(
    history_path: &Path,
    provider: Arc<CountingProvider>,
    fetcher: Arc<dyn PageFetcher>,
) -> Session {
    Session::start(
        &TextDoc("DIU handbook: tuition, courses, events."),
        Box::new(JsonFileStore::new(history_path)),
        &[],
        invoker(provider, fetcher),
    )
    .await
    .unwrap()
}

fn page(text: &str) -> Arc<dyn PageFetcher> {
    Arc::new(StaticPage(text.into()))
}

// ── Persistence ──────────────────────────────────────────────────────────

#[tokio::test]
async fn turns_persist_and_reload_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation_history.json");
    let provider = Arc::new(CountingProvider::new());

    let mut session = start(&path, provider.clone(), page("listings")).await;
    session.submit("hi").await.unwrap();
    session.submit("What courses are offered?").await.unwrap();
    session.submit("hi").await.unwrap();

    let on_disk = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(session.history().len(), 6);
    assert_eq!(on_disk.len(), 6);
    assert_eq!(on_disk, session.history());
    assert_eq!(on_disk[0], Message::user("hi"));
    assert_eq!(on_disk[1], Message::assistant("answer 1"));
    assert_eq!(on_disk[4], Message::user("hi"));

    // A fresh session picks up where the last one stopped
    let reopened = start(&path, Arc::new(CountingProvider::new()), page("")).await;
    assert_eq!(reopened.history(), on_disk.as_slice());
}

#[tokio::test]
async fn clear_resets_memory_and_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation_history.json");
    let provider = Arc::new(CountingProvider::new());

    let mut session = start(&path, provider, page("")).await;
    session.submit("hello").await.unwrap();
    session.clear().await.unwrap();

    assert!(session.history().is_empty());
    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert!(JsonFileStore::new(&path).load().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_clear_has_no_outcome() {
    let provider = Arc::new(CountingProvider::new());
    let mut session = Session::start(
        &TextDoc("handbook"),
        Box::new(ReadOnlyDisk),
        &[],
        invoker(provider, page("")),
    )
    .await
    .unwrap();

    let err = session.clear().await.unwrap_err();
    assert!(matches!(err, SessionError::Persist { outcome: None, .. }));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn persistence_failure_keeps_in_memory_turn() {
    let provider = Arc::new(CountingProvider::new());
    let mut session = Session::start(
        &TextDoc("handbook"),
        Box::new(ReadOnlyDisk),
        &[],
        invoker(provider.clone(), page("")),
    )
    .await
    .unwrap();

    let err = session.submit("hello").await.unwrap_err();
    assert!(matches!(err, SessionError::Persist { .. }));
    assert!(err.to_string().contains("read-only file system"));

    // The answer still reaches the caller
    let outcome = err.outcome().unwrap();
    assert_eq!(outcome.kind, AssistantKind::General);
    assert_eq!(outcome.response, "answer 1");
    assert_eq!(session.history()[1], Message::assistant("answer 1"));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert_eq!(provider.calls(), 1);
}

// ── Routing ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn email_takes_precedence_over_job() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(CountingProvider::new());
    let mut session = start(&dir.path().join("h.json"), provider.clone(), page("")).await;

    let outcome = session
        .submit("Write an EMAIL asking about the job fair")
        .await
        .unwrap();
    assert_eq!(outcome.kind, AssistantKind::Email);
    assert!(provider.last_prompt().starts_with("Draft a professional email"));
}

#[tokio::test]
async fn general_questions_use_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(CountingProvider::new());
    let mut session = start(&dir.path().join("h.json"), provider.clone(), page("")).await;

    let outcome = session.submit("What is the tuition?").await.unwrap();
    assert_eq!(outcome.kind, AssistantKind::General);
    assert_eq!(outcome.response, "answer 1");
    assert!(provider.last_prompt().contains("DIU handbook: tuition, courses, events."));
}

// ── Job search ───────────────────────────────────────────────────────────

#[tokio::test]
async fn job_listing_is_truncated_to_5000_chars() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(CountingProvider::new());
    let listing = "L".repeat(20_000);
    let mut session = start(&dir.path().join("h.json"), provider.clone(), page(&listing)).await;

    let outcome = session.submit("any jobs for CSE graduates?").await.unwrap();
    assert_eq!(outcome.kind, AssistantKind::JobSearch);

    let prompt = provider.last_prompt();
    assert_eq!(prompt.matches('L').count(), 5000);
    assert!(prompt.contains(&format!("{}\n\nUser Query:", "L".repeat(5000))));
}

#[tokio::test]
async fn portal_failure_is_stored_without_calling_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    let provider = Arc::new(CountingProvider::new());
    let mut session = start(&path, provider.clone(), Arc::new(BrokenPortal)).await;

    let outcome = session.submit("latest job openings").await.unwrap();
    assert_eq!(
        outcome.response,
        "Error accessing job search portal: Tool execution failed: web_page: connection reset"
    );
    assert_eq!(provider.calls(), 0);

    let on_disk = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(on_disk.len(), 2);
    assert_eq!(on_disk[1].role, Role::Assistant);
    assert_eq!(on_disk[1].message, outcome.response);
}

// ── Startup ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn unreadable_document_halts_before_any_turn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.json");
    let provider = Arc::new(CountingProvider::new());

    let result = Session::start(
        &MissingDoc,
        Box::new(JsonFileStore::new(&path)),
        &[],
        invoker(provider.clone(), page("")),
    )
    .await;

    assert!(matches!(result, Err(SessionError::DocumentUnavailable { .. })));
    assert_eq!(provider.calls(), 0);
    assert!(!path.exists());
}
