//! JSON file history store.
//!
//! The log lives in a single file holding a JSON array of
//! `{"role": ..., "message": ...}` objects, pretty-printed with four-space
//! indentation so it stays readable by hand.
//!
//! Every save rewrites the whole file through a sibling temp file that is
//! synced and then renamed over the target. A crash mid-save leaves either
//! the previous log or the new one, never a torn file.

use async_trait::async_trait;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uniassist_core::error::HistoryError;
use uniassist_core::history::HistoryStore;
use uniassist_core::message::Message;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, reason: impl std::fmt::Display) -> HistoryError {
        HistoryError::Write {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Parse a stored log. Blank content is an empty log.
pub(crate) fn parse_log(path: &Path, content: &str) -> Result<Vec<Message>, HistoryError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| HistoryError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize a log as a JSON array indented by four spaces.
pub(crate) fn render_log(messages: &[Message]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    messages.serialize(&mut ser)?;
    Ok(buf)
}

pub(crate) async fn read_log(path: &Path) -> Result<Vec<Message>, HistoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(HistoryError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };
    parse_log(path, &content)
}

#[async_trait]
impl HistoryStore for JsonFileStore {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn load(&self) -> Result<Vec<Message>, HistoryError> {
        let messages = read_log(&self.path).await?;
        debug!(path = %self.path.display(), count = messages.len(), "History loaded");
        Ok(messages)
    }

    async fn save(&self, messages: &[Message]) -> Result<(), HistoryError> {
        let content = render_log(messages).map_err(|e| self.write_err(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;
        }

        let tmp = self.tmp_path();
        let written = (|| -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&content)?;
            file.sync_all()?;
            std::fs::rename(&tmp, &self.path)
        })();

        if let Err(e) = written {
            if std::fs::remove_file(&tmp).is_ok() {
                warn!(path = %tmp.display(), "Removed partial history file");
            }
            return Err(self.write_err(e));
        }

        debug!(path = %self.path.display(), count = messages.len(), "History saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonFileStore::new(&path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"role\": \"user\"").unwrap();
        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, HistoryError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn save_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileStore::new(&path);
        store.save(&[Message::user("hi")]).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"role\": \"user\",\n        \"message\": \"hi\"\n    }\n]"
        );
    }

    #[tokio::test]
    async fn save_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = JsonFileStore::new(&path);
        store
            .save(&[Message::user("hi"), Message::assistant("Hello!")])
            .await
            .unwrap();

        assert!(path.exists());
        assert!(!store.tmp_path().exists());
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clear_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileStore::new(&path);
        store.save(&[Message::user("hi")]).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[test]
    fn non_ascii_is_written_verbatim() {
        let bytes = render_log(&[Message::user("ঢাকা")]).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("ঢাকা"));
    }
}
