//! Plain text and markdown documents, read verbatim.

use std::path::PathBuf;
use uniassist_core::document::DocumentSource;
use uniassist_core::error::DocumentError;

pub struct TextDocument {
    path: PathBuf,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for TextDocument {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn extract_text(&self) -> Result<String, DocumentError> {
        std::fs::read_to_string(&self.path).map_err(|e| DocumentError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
