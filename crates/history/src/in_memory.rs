//! In-memory history store, useful for testing and throwaway sessions.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uniassist_core::error::HistoryError;
use uniassist_core::history::HistoryStore;
use uniassist_core::message::Message;

/// A history store that keeps the log in a `Vec`.
///
/// Clones share the same log, so a test can hand one clone to a session and
/// inspect the other.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    messages: Arc<RwLock<Vec<Message>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing log, as if loaded from disk.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(messages)),
            saves: Arc::default(),
        }
    }

    /// Snapshot of the stored log.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// How many times `save` (or `clear`) has run.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self) -> Result<Vec<Message>, HistoryError> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, messages: &[Message]) -> Result<(), HistoryError> {
        *self.messages.write().await = messages.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_replaces_log() {
        let store = InMemoryStore::with_messages(vec![Message::user("old")]);
        store.save(&[Message::user("new")]).await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec![Message::user("new")]);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let observer = store.clone();
        store.save(&[Message::assistant("hi")]).await.unwrap();
        assert_eq!(observer.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_log() {
        let store = InMemoryStore::with_messages(vec![Message::user("x")]);
        store.clear().await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }
}
