//! Error types, one enum per collaborator.
//!
//! There is no crate-wide error: the session decides per failure whether a
//! turn ends, degrades or halts startup, so callers always match on the
//! narrow type.

use std::path::PathBuf;
use thiserror::Error;

/// A language-model call failed.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// A tool call or page fetch failed. Shown to the model as tool output.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

/// The conversation file could not be read or written.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to read history at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write history at {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("History file at {path} is not valid: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// The reference document could not be opened or extracted.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error reading document {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}
