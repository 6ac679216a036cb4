//! Reference document extraction.

use crate::error::DocumentError;

/// A source of reference-document text.
///
/// Extraction is synchronous and runs once per process start.
pub trait DocumentSource: Send + Sync {
    /// Where the text comes from, for diagnostics.
    fn location(&self) -> String;

    /// Extract the full plain text of the document.
    fn extract_text(&self) -> std::result::Result<String, DocumentError>;
}
