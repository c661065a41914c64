//! Chat module - one conversational turn at a time
//!
//! Each turn is interpreted as either a training command, a web-learning command,
//! or ordinary text answered by the response matcher. Every turn is recorded in the
//! caller's transcript.

pub mod service;

pub use service::{ChatReply, ChatService, LEARNING_ACK, ReplyKind, TRAINED_ACK};
