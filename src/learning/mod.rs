// src/learning/mod.rs
// Learning training entries from web pages

pub mod extract;
pub mod fetch;
pub mod learner;
pub mod pairing;

pub use extract::{TextBlock, extract_blocks};
pub use fetch::{HttpPageFetcher, PageFetcher, ScrapingService};
pub use learner::{IngestReport, WebLearner};
pub use pairing::{SentencePair, pair_sentences};
