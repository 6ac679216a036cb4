//! History persistence port.
//!
//! The session owns the conversation in memory and hands the full sequence
//! to a [`HistoryStore`] after every turn. Stores never append on their own.

use crate::error::HistoryError;
use crate::message::Message;
use async_trait::async_trait;

/// Durable storage for an ordered message log.
///
/// Implementations: JSON file (atomic overwrite), in-memory (for testing).
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The backend name (e.g., "json_file", "in_memory").
    fn name(&self) -> &str;

    /// Load the full log. A store with no prior state yields an empty sequence.
    async fn load(&self) -> std::result::Result<Vec<Message>, HistoryError>;

    /// Replace the stored log with `messages`.
    async fn save(&self, messages: &[Message]) -> std::result::Result<(), HistoryError>;

    /// Reset the stored log to empty.
    async fn clear(&self) -> std::result::Result<(), HistoryError> {
        self.save(&[]).await
    }
}
