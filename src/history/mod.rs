// file: src/history/mod.rs
// description: history persistence module exports
// reference: internal module structure

pub mod json_store;
pub mod store;

pub use json_store::{HistoryState, JsonHistoryStore, from_document, to_document};
pub use store::{HistoryStore, InMemoryHistoryStore};
