//! Continuation cursors and fetched log chunks
//!
//! A [`Cursor`] marks the position after the last event already delivered
//! for one run. It is produced by the backend and replayed verbatim on the
//! next fetch; nothing in this crate parses or compares its contents.
//!
//! `Option<Cursor>` is the only position type callers see: `None` means
//! "start from the head of the stream".

use serde::{Deserialize, Serialize};

/// Opaque continuation token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a backend token
    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    /// The token exactly as the backend issued it
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token carries no position and is treated like no cursor
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Cursor(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Cursor(token.to_string())
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text fetched in one call plus where to resume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogChunk {
    /// Messages joined with `\n`, oldest first
    pub text: String,
    /// Cursor to pass to the next fetch
    pub next: Option<Cursor>,
}

impl LogChunk {
    /// No text and no cursor; returned for runs that cannot have logs yet
    pub fn empty() -> Self {
        LogChunk::default()
    }

    /// No new text, resume from `next`
    pub fn unchanged(next: Option<Cursor>) -> Self {
        LogChunk {
            text: String::new(),
            next,
        }
    }

    /// Check if no text was fetched
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
