//! Record parser for `timestamp level message` lines
//!
//! A line is split on ASCII whitespace: the first token is the timestamp, the second
//! the level, and everything after the level (minus one separating whitespace
//! character) is the message. Lines with fewer than two tokens are dropped.

use tracing::trace;

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: String,
    level: String,
    message: String,
}

impl LogRecord {
    pub fn new(
        timestamp: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            message: message.into(),
        }
    }

    /// Raw timestamp token, never validated
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Field separators: space, `\t`, `\n`, `\x0b`, `\x0c` and `\r`.
///
/// Unicode spaces such as U+00A0 belong to the token they appear in.
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Split off the next separator-delimited token, returning it and the rest
/// of the input starting right after the token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let start = input.find(|c: char| !is_separator(c))?;
    let rest = &input[start..];
    let end = rest.find(is_separator).unwrap_or(rest.len());
    Some((&rest[..end], &rest[end..]))
}

/// Parse one raw line into a record.
///
/// Returns `None` when the line holds fewer than two whitespace-delimited
/// tokens. Trailing `\r`/`\n` terminators are not part of the message.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let (timestamp, rest) = next_token(line)?;
    let (level, rest) = next_token(rest)?;

    // Exactly one separator between level and message
    let message = match rest.chars().next() {
        Some(c) if is_separator(c) => &rest[c.len_utf8()..],
        _ => rest,
    };

    Some(LogRecord::new(timestamp, level, message))
}

/// Records parsed from a block of text, with line accounting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLines {
    pub records: Vec<LogRecord>,
    pub lines_read: usize,
    pub lines_dropped: usize,
}

/// Run [`parse_line`] over every line of `text`, in order.
pub fn parse_lines(text: &str) -> ParsedLines {
    let mut parsed = ParsedLines::default();

    for (idx, line) in text.lines().enumerate() {
        parsed.lines_read += 1;
        match parse_line(line) {
            Some(record) => parsed.records.push(record),
            None => {
                parsed.lines_dropped += 1;
                trace!(line_num = idx + 1, line, "dropping unparseable line");
            }
        }
    }

    parsed
}
