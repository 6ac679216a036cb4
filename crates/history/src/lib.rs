//! Conversation history stores for UniAssist.
//!
//! - [`JsonFileStore`] is the durable log, rewritten in full after each turn.
//! - [`InMemoryStore`] keeps the log in process, for tests.
//! - [`ReferenceDataset`] is a read-only log of the same shape, loaded once.

pub mod in_memory;
pub mod json_file;
pub mod reference;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use reference::ReferenceDataset;
