//! The normalised quotation every ingestor produces.

use crate::error::LineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quotation and its author.
///
/// Immutable once built; two quotes are the same quote when their text is.
/// Neither field is empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuote")]
pub struct Quote {
    body: String,
    author: String,
}

impl Quote {
    /// Build a quote, rejecting a blank body or author.
    ///
    /// Text is stored as given; callers that want trimming do it first.
    pub fn try_new(body: impl Into<String>, author: impl Into<String>) -> Result<Self, LineError> {
        let (body, author) = (body.into(), author.into());
        if body.trim().is_empty() {
            return Err(LineError::EmptyBody);
        }
        if author.trim().is_empty() {
            return Err(LineError::EmptyAuthor);
        }
        Ok(Self { body, author })
    }

    /// Unchecked constructor for callers that already validated both fields.
    pub(crate) fn new(body: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            author: author.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.body, self.author)
    }
}

/// Wire shape of a [`Quote`], validated on the way in.
#[derive(Deserialize)]
struct RawQuote {
    body: String,
    author: String,
}

impl TryFrom<RawQuote> for Quote {
    type Error = LineError;

    fn try_from(raw: RawQuote) -> Result<Self, Self::Error> {
        Quote::try_new(raw.body, raw.author)
    }
}
