// src/training/command.rs
// Chat-embedded control commands: `/train <pattern> | <response>` and `/learn <url>`

/// What a chat message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Train { pattern: &'a str, response: &'a str },
    Learn { url: &'a str },
    /// Ordinary text (including malformed commands) for the matcher.
    Chat,
}

/// Remainder after `word`, provided `word` is followed by whitespace.
fn command_argument<'a>(input: &'a str, word: &str) -> Option<&'a str> {
    let rest = input.trim_start().strip_prefix(word)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

pub fn parse(input: &str) -> Command<'_> {
    if let Some(rest) = command_argument(input, "/train") {
        if let Some((pattern, response)) = rest.split_once('|') {
            let (pattern, response) = (pattern.trim(), response.trim());
            if !pattern.is_empty() && !response.is_empty() {
                return Command::Train { pattern, response };
            }
        }
    }

    if let Some(rest) = command_argument(input, "/learn") {
        let url = rest.trim();
        if url.starts_with("http") {
            return Command::Learn { url };
        }
    }

    Command::Chat
}
