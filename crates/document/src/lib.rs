//! Reference document loading.
//!
//! The document is read once per process start. [`open`] picks a
//! [`DocumentSource`] from the file extension and [`load_document_text`]
//! collapses any failure to an empty string, which callers treat as
//! "no document".

pub mod pdf;
pub mod text;

use std::path::Path;
use tracing::{error, info};
use uniassist_core::document::DocumentSource;
use uniassist_core::error::DocumentError;

pub use pdf::PdfDocument;
pub use text::TextDocument;

/// Choose a document source for `path` by extension.
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn DocumentSource>, DocumentError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfDocument::new(path))),
        "txt" | "md" | "markdown" => Ok(Box::new(TextDocument::new(path))),
        other => Err(DocumentError::Unsupported(format!(
            "{} (extension '{other}')",
            path.display()
        ))),
    }
}

/// Extract the document's text, or return an empty string on any failure.
///
/// Whitespace-only output counts as a failure.
pub fn load_document_text(source: &dyn DocumentSource) -> String {
    match source.extract_text() {
        Ok(text) if text.trim().is_empty() => {
            error!(location = %source.location(), "Document contains no extractable text");
            String::new()
        }
        Ok(text) => {
            info!(location = %source.location(), chars = text.chars().count(), "Document loaded");
            text
        }
        Err(e) => {
            error!(location = %source.location(), error = %e, "Failed to read document");
            String::new()
        }
    }
}
