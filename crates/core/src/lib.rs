//! # UniAssist Core
//!
//! Domain types, traits, and error definitions for the UniAssist
//! conversational front-end. This crate has **no I/O of its own**; it
//! defines the model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here:
//! - [`Provider`]: the language model behind an assistant
//! - [`Tool`]: a callable capability handed to the model
//! - [`PageFetcher`]: raw page retrieval for the job-search flow
//! - [`HistoryStore`]: durable conversation persistence
//! - [`DocumentSource`]: reference document text extraction
//!
//! Implementations live in their respective crates, so the routing and
//! prompt-assembly layer can be tested with in-process stubs.

pub mod assistant;
pub mod document;
pub mod error;
pub mod fetch;
pub mod history;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use assistant::{AssistantKind, AssistantProfile};
pub use document::DocumentSource;
pub use error::{DocumentError, HistoryError, ProviderError, ToolError};
pub use fetch::PageFetcher;
pub use history::HistoryStore;
pub use message::{Message, Role, render_transcript};
pub use provider::{ChatMessage, ChatRole, Provider, ProviderRequest, ProviderResponse};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
