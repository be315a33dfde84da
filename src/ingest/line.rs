//! Line parser shared by the text, DOCX and PDF ingestors.
//!
//! A raw line has the shape `["]body["] - ["]author["]`. The spaced
//! delimiter `" - "` wins when present so hyphenated words in the body
//! survive (`"Well-fed dogs" - Rex`); otherwise the first bare `-` splits.
//! Everything after the split point, further hyphens included, is the author.

use crate::error::{LineError, MemeError};
use crate::quote::Quote;
use std::path::Path;

const QUOTE_CHARS: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// Parse one raw line into a [`Quote`].
pub fn parse_line(raw: &str) -> Result<Quote, LineError> {
    let (body, author) = split_delimiter(raw).ok_or(LineError::MissingDelimiter)?;

    let body = clean_field(body);
    if body.is_empty() {
        return Err(LineError::EmptyBody);
    }
    let author = clean_field(author);
    if author.is_empty() {
        return Err(LineError::EmptyAuthor);
    }

    Ok(Quote::new(body, author))
}

/// Parse a sequence of raw lines, skipping blank ones.
///
/// The first malformed line aborts the whole source; the error carries
/// `source` and the 1-based line number.
pub fn parse_lines<I, S>(lines: I, source: &Path) -> Result<Vec<Quote>, MemeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut quotes = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let quote = parse_line(line).map_err(|reason| MemeError::MalformedLine {
            path: source.to_path_buf(),
            line: idx + 1,
            content: line.trim_end().to_string(),
            reason,
        })?;
        quotes.push(quote);
    }
    Ok(quotes)
}

fn split_delimiter(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(" - ").or_else(|| raw.split_once('-'))
}

/// Trim whitespace, one layer of quote marks, then whitespace again.
fn clean_field(field: &str) -> &str {
    let s = field.trim();
    let s = s.strip_prefix(&QUOTE_CHARS[..]).unwrap_or(s);
    let s = s.strip_suffix(&QUOTE_CHARS[..]).unwrap_or(s);
    s.trim()
}
