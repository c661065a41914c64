// src/lib.rs

pub mod api;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod learning;
pub mod messages;
pub mod state;
pub mod training;

// Export commonly used items
pub use config::CONFIG;
pub use error::{ChatError, ChatResult};
pub use state::AppState;
