//! Readable-block extraction from fetched HTML.
//!
//! Headings and paragraphs are the only blocks considered; everything else on the
//! page (navigation, scripts, tables) is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Cached regexes for HTML processing
static RE_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));
static RE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));
static RE_BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(p|h[1-6])(?:\s[^>]*)?>").expect("valid regex"));
// A block ends at its closing tag, the next block's opening tag, or the end of the body.
static RE_BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:p|h[1-6])(?:\s[^>]*)?>|</body\s*>").expect("valid regex")
});
static RE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(?:br|/?(?:div|li|ul|ol|dl|dt|dd|tr|td|th|table|section|article|blockquote))\b[^>]*>")
        .expect("valid regex")
});
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Blocks of this many characters or fewer are dropped.
pub const MIN_BLOCK_CHARS: usize = 10;
/// Blocks of this many characters or more are dropped.
pub const MAX_BLOCK_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub text: String,
    /// Lower-cased element name (`p`, `h1` .. `h6`).
    pub tag: String,
}

/// Plain text of an HTML fragment: tags removed, entities decoded, whitespace collapsed.
///
/// Line breaks and block-level tags become spaces; inline tags vanish without one.
pub fn fragment_text(fragment: &str) -> String {
    let text = RE_BREAK.replace_all(fragment, " ");
    let text = RE_TAG.replace_all(&text, "");
    html_escape::decode_html_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_readable(text: &str) -> bool {
    let len = text.chars().count();
    len > MIN_BLOCK_CHARS && len < MAX_BLOCK_CHARS
}

/// Paragraph and heading blocks of readable length, in document order.
///
/// Unclosed `<p>` elements are cut at the next paragraph or heading.
pub fn extract_blocks(html: &str) -> Vec<TextBlock> {
    let html = RE_SCRIPT.replace_all(html, "");
    let html = RE_STYLE.replace_all(&html, "");

    RE_BLOCK_OPEN
        .captures_iter(&html)
        .filter_map(|caps| {
            let open = caps.get(0)?;
            let tag = caps.get(1)?.as_str().to_lowercase();
            let rest = &html[open.end()..];
            let body_end = RE_BLOCK_END.find(rest).map_or(rest.len(), |m| m.start());
            let text = fragment_text(&rest[..body_end]);
            is_readable(&text).then_some(TextBlock { text, tag })
        })
        .collect()
}
