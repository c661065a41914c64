// src/api/http/mod.rs

pub mod chat;
pub mod health;
pub mod router;
pub mod training;

pub use router::http_router;
