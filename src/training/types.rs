// src/training/types.rs

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

pub type EntryId = i64;

/// Where a training entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    User,
    Web,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::User => "user",
            Source::Web => "web",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Source::User),
            "web" => Some(Source::Web),
            _ => None,
        }
    }
}

/// A stored pattern/response pair with provenance and feedback metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingEntry {
    pub id: EntryId,
    /// Lower-cased match key.
    pub pattern: String,
    pub response: String,
    pub owner: Option<UserId>,
    pub uses: u64,
    pub rating: f64,
    pub source: Source,
    /// Set only for web-sourced entries.
    pub origin_url: Option<String>,
    pub created_at: i64,
}

/// An entry waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub pattern: String,
    pub response: String,
    pub owner: Option<UserId>,
    pub source: Source,
    pub origin_url: Option<String>,
}

impl NewEntry {
    pub fn user(pattern: impl Into<String>, response: impl Into<String>, owner: UserId) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
            owner: Some(owner),
            source: Source::User,
            origin_url: None,
        }
    }

    pub fn web(
        pattern: impl Into<String>,
        response: impl Into<String>,
        origin_url: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
            owner: None,
            source: Source::Web,
            origin_url: Some(origin_url.into()),
        }
    }

    /// Lower-cases and trims the pattern. Returns `None` when the pattern or the
    /// response is empty after trimming.
    pub fn normalized(self) -> Option<Self> {
        let pattern = self.pattern.trim().to_lowercase();
        if pattern.is_empty() || self.response.trim().is_empty() {
            return None;
        }

        // Web provenance travels with web entries only
        let origin_url = match self.source {
            Source::Web => self.origin_url,
            Source::User => None,
        };

        Some(Self {
            pattern,
            origin_url,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_lowercases_pattern() {
        let owner = UserId::new("u1").unwrap();
        let entry = NewEntry::user("  Hello THERE ", "Hi!", owner)
            .normalized()
            .unwrap();
        assert_eq!(entry.pattern, "hello there");
        assert_eq!(entry.response, "Hi!");
        assert_eq!(entry.source, Source::User);
    }

    #[test]
    fn test_normalized_rejects_blank_sides() {
        let owner = UserId::new("u1").unwrap();
        assert!(NewEntry::user("   ", "x", owner.clone()).normalized().is_none());
        assert!(NewEntry::user("x", " \t ", owner).normalized().is_none());
    }

    #[test]
    fn test_source_round_trip() {
        for source in [Source::User, Source::Web] {
            assert_eq!(Source::parse(source.as_str()), Some(source));
        }
        assert_eq!(Source::parse("robot"), None);
    }
}
