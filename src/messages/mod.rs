// src/messages/mod.rs
// Append-only chat transcript, queryable per owner in insertion order

pub mod store;

pub use store::{ChatMessage, MessageLog, Role, SqliteMessageLog};
