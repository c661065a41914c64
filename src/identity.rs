//! Caller identity.
//!
//! Identity is resolved outside the core (HTTP header, CLI flag) and handed to the
//! chat service as a [`Caller`]. Mutating operations require a resolved user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

use crate::error::{ChatError, ChatResult};

/// Header carrying the authenticated user id.
pub const USER_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for blank ids.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identity behind a request, if any.
#[derive(Debug, Clone, Default)]
pub struct Caller(Option<UserId>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(id: UserId) -> Self {
        Self(Some(id))
    }

    pub fn from_raw(id: Option<&str>) -> Self {
        Self(id.and_then(UserId::new))
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.0.as_ref()
    }

    pub fn require_user(&self) -> ChatResult<&UserId> {
        self.0.as_ref().ok_or(ChatError::Unauthenticated)
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok());
        Ok(Caller::from_raw(raw))
    }
}
