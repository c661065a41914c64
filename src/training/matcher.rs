// src/training/matcher.rs
//! Response matcher: scores every stored pattern against the input and returns the
//! response of the single best entry.
//!
//! ```text
//! finalScore = matchScore * (1 + rating / 5) * (1 + ln(uses + 1)) * sourceBonus
//! ```
//!
//! `matchScore` counts the pattern's words (duplicates included) that occur in the
//! input. Only strictly positive scores can win, and ties keep the earliest entry.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::store::PatternStore;
use super::types::{EntryId, Source, TrainingEntry};
use crate::error::{ChatResult, IgnoreMissing};

pub const FALLBACK_RESPONSE: &str = "I don't know how to respond to that yet. You can teach me using /train pattern | response or /learn URL";

/// Web-scraped text is trusted a little less than human-curated entries.
pub const WEB_SOURCE_BONUS: f64 = 0.8;
pub const USER_SOURCE_BONUS: f64 = 1.0;

/// Lower-cased whitespace-separated words of the input.
pub fn input_words(input: &str) -> HashSet<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub fn match_score(pattern: &str, input_words: &HashSet<String>) -> u32 {
    pattern
        .split_whitespace()
        .filter(|word| input_words.contains(*word))
        .count() as u32
}

pub fn source_bonus(source: Source) -> f64 {
    match source {
        Source::Web => WEB_SOURCE_BONUS,
        Source::User => USER_SOURCE_BONUS,
    }
}

pub fn final_score(entry: &TrainingEntry, input_words: &HashSet<String>) -> f64 {
    let matched = match_score(&entry.pattern, input_words);
    if matched == 0 {
        return 0.0;
    }

    let rating_factor = 1.0 + entry.rating / 5.0;
    let usage_factor = 1.0 + (entry.uses as f64 + 1.0).ln();
    f64::from(matched) * rating_factor * usage_factor * source_bonus(entry.source)
}

#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub entry: &'a TrainingEntry,
    pub score: f64,
}

/// Picks the entry with the highest strictly positive score; the first one seen wins ties.
/// Entries rated below `min_rating` (when given) are skipped.
pub fn select_best<'a>(
    entries: &'a [TrainingEntry],
    input: &str,
    min_rating: Option<f64>,
) -> Option<Selection<'a>> {
    let words = input_words(input);
    let mut best: Option<Selection<'a>> = None;
    let mut best_score = 0.0;

    for entry in entries {
        if min_rating.is_some_and(|min| entry.rating < min) {
            continue;
        }

        let score = final_score(entry, &words);
        if score > best_score {
            best_score = score;
            best = Some(Selection { entry, score });
        }
    }

    best
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub response: String,
    /// `None` when the fallback was returned.
    pub entry_id: Option<EntryId>,
    pub score: f64,
}

impl MatchOutcome {
    pub fn fallback() -> Self {
        Self {
            response: FALLBACK_RESPONSE.to_string(),
            entry_id: None,
            score: 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.entry_id.is_none()
    }
}

pub struct ResponseMatcher {
    store: Arc<dyn PatternStore>,
    min_rating: Option<f64>,
}

impl ResponseMatcher {
    pub fn new(store: Arc<dyn PatternStore>) -> Self {
        Self {
            store,
            min_rating: None,
        }
    }

    pub fn with_min_rating(mut self, min_rating: Option<f64>) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// Selects the best response for `input` and counts the use of the winning entry.
    pub async fn respond(&self, input: &str) -> ChatResult<MatchOutcome> {
        let entries = self.store.all().await?;

        let Some(selection) = select_best(&entries, input, self.min_rating) else {
            info!("No pattern matched ({} entries scanned), using fallback", entries.len());
            return Ok(MatchOutcome::fallback());
        };

        let id = selection.entry.id;
        debug!("Matched entry {} with score {:.3}", id, selection.score);

        // The row may have vanished since the scan; that is not worth failing the turn
        self.store.increment_uses(id).await.ignore_missing()?;

        Ok(MatchOutcome {
            response: selection.entry.response.clone(),
            entry_id: Some(id),
            score: selection.score,
        })
    }
}
