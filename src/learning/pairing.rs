// src/learning/pairing.rs
// Turns one block of page text into at most one (pattern, response) pair

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Both sides of a pair must be at least this many characters long.
pub const MIN_PAIR_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub pattern: String,
    pub response: String,
}

/// Non-empty fragments between runs of `.`, `!` and `?`. Fragments keep their
/// surrounding whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// First sentence becomes the (lower-cased) pattern, the rest joined by `". "` the response.
pub fn pair_sentences(text: &str) -> Option<SentencePair> {
    let sentences = split_sentences(text);
    let (first, rest) = sentences.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let pattern = first.trim().to_lowercase();
    let response = rest.join(". ").trim().to_string();

    if pattern.chars().count() < MIN_PAIR_CHARS || response.chars().count() < MIN_PAIR_CHARS {
        return None;
    }

    Some(SentencePair { pattern, response })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pattern_rejected() {
        assert_eq!(
            pair_sentences("Hi. This is a test sentence that is long enough."),
            None
        );
    }

    #[test]
    fn test_two_long_sentences_pair() {
        let pair = pair_sentences("Rust Is A Systems Language. It focuses on safety!").unwrap();
        assert_eq!(pair.pattern, "rust is a systems language");
        assert_eq!(pair.response, "It focuses on safety");
    }

    #[test]
    fn test_rest_joined_with_period() {
        let pair =
            pair_sentences("What is the answer? It is forty two. Or so they say!!").unwrap();
        assert_eq!(pair.pattern, "what is the answer");
        assert_eq!(pair.response, "It is forty two.  Or so they say");
    }

    #[test]
    fn test_single_sentence_yields_nothing() {
        assert_eq!(pair_sentences("Only one sentence in this block."), None);
        assert_eq!(pair_sentences("...!!!"), None);
    }

    #[test]
    fn test_short_response_rejected() {
        assert_eq!(pair_sentences("This pattern is long enough. Too short."), None);
    }
}
