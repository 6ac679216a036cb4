//! PDF documents, extracted page by page with `pdf-extract`.

use std::path::{Path, PathBuf};
use uniassist_core::document::DocumentSource;
use uniassist_core::error::DocumentError;

pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for PdfDocument {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn extract_text(&self) -> Result<String, DocumentError> {
        if !self.path.is_file() {
            return Err(DocumentError::Unreadable {
                path: self.path.clone(),
                reason: "file not found".into(),
            });
        }

        pdf_extract::extract_text(&self.path).map_err(|e| DocumentError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unreadable() {
        let doc = PdfDocument::new("/nonexistent/DIU.pdf");
        let err = doc.extract_text().unwrap_err();
        assert!(err.to_string().starts_with("Error reading document /nonexistent/DIU.pdf"));
    }
}
