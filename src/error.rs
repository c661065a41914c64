// src/error.rs
// Domain error type shared by stores, services and the web learner

use thiserror::Error;

use crate::training::EntryId;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Training entry {0} not found")]
    NotFound(EntryId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
}

impl ChatError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Turns `NotFound` into `Ok(None)`; usage and rating updates on a vanished row are harmless.
pub trait IgnoreMissing<T> {
    fn ignore_missing(self) -> ChatResult<Option<T>>;
}

impl<T> IgnoreMissing<T> for ChatResult<T> {
    fn ignore_missing(self) -> ChatResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(ChatError::NotFound(id)) => {
                tracing::debug!("ignoring update for missing training entry {}", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_missing_swallows_not_found_only() {
        let missing: ChatResult<()> = Err(ChatError::NotFound(7));
        assert!(matches!(missing.ignore_missing(), Ok(None)));

        let ok: ChatResult<u8> = Ok(3);
        assert!(matches!(ok.ignore_missing(), Ok(Some(3))));

        let unauth: ChatResult<()> = Err(ChatError::Unauthenticated);
        assert!(matches!(
            unauth.ignore_missing(),
            Err(ChatError::Unauthenticated)
        ));
    }

    #[test]
    fn test_fetch_error_message() {
        let err = ChatError::fetch("http://example.com", "HTTP 500");
        assert_eq!(err.to_string(), "Failed to fetch http://example.com: HTTP 500");
    }
}
