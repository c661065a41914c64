// src/training/mod.rs
// Pattern store, response matcher and training commands

pub mod command;
pub mod matcher;
pub mod store;
pub mod types;

pub use command::Command;
pub use matcher::{FALLBACK_RESPONSE, MatchOutcome, ResponseMatcher};
pub use store::{PatternStore, SqlitePatternStore};
pub use types::{EntryId, NewEntry, Source, TrainingEntry};
