//! Reference dataset: a read-only conversation log loaded once at startup.
//!
//! It has the same on-disk shape as the history file and is rendered into
//! every prompt as additional context. Nothing ever writes it back.

use crate::json_file::read_log;
use std::path::Path;
use tracing::{debug, warn};
use uniassist_core::error::HistoryError;
use uniassist_core::message::{Message, render_transcript};

#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    messages: Vec<Message>,
}

impl ReferenceDataset {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Read the dataset at `path`. A missing or blank file is an empty dataset.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let messages = read_log(path).await?;
        debug!(path = %path.display(), count = messages.len(), "Reference dataset loaded");
        Ok(Self { messages })
    }

    /// Like [`load`](Self::load) but an unreadable file degrades to empty.
    pub async fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path).await {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable reference dataset");
                Self::default()
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The dataset as transcript lines.
    pub fn render(&self) -> String {
        render_transcript(&self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"role": "user", "message": "Where is the library?"},
                {"role": "assistant", "message": "Building 4, ground floor."}]"#,
        )
        .unwrap();

        let dataset = ReferenceDataset::load(&path).await.unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.render(),
            "User: Where is the library?\nAssistant: Building 4, ground floor."
        );
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = ReferenceDataset::load(dir.path().join("none.json"))
            .await
            .unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.render(), "");
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(ReferenceDataset::load(&path).await.is_err());
        assert!(ReferenceDataset::load_or_empty(&path).await.is_empty());
    }
}
