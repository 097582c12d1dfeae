//! Opaque cursor pointing at the start of the next page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base36::{self, Base36Error};
use crate::page::PageRequest;

/// Errors raised while parsing a client-supplied cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cursor: {source}")]
pub struct CursorError {
    #[from]
    source: Base36Error,
}

/// Base36-encoded offset into an ordered result set.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let cursor: Cursor = "k".parse().expect("valid cursor");
/// assert_eq!(cursor.offset(), 20);
/// assert_eq!(Cursor::from_offset(40).to_string(), "14");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(u64);

impl Cursor {
    /// Build a cursor for the given zero-based offset.
    #[must_use]
    pub const fn from_offset(offset: u64) -> Self {
        Self(offset)
    }

    /// Zero-based offset the cursor points at.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.0
    }

    /// Page request starting at this cursor with the given page size.
    #[must_use]
    pub fn page(self, limit: u64) -> PageRequest {
        PageRequest::starting_at(self.0, limit)
    }
}

impl From<PageRequest> for Cursor {
    fn from(value: PageRequest) -> Self {
        Self(value.offset())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base36::encode(self.0))
    }
}

impl FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(base36::decode(s)?))
    }
}

impl TryFrom<String> for Cursor {
    type Error = CursorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cursor> for String {
    fn from(value: Cursor) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    //! Cursor parsing and serialisation coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn cursor_serialises_as_base36_string() {
        let json = serde_json::to_string(&Cursor::from_offset(72)).expect("serialise cursor");
        assert_eq!(json, "\"20\"");
    }

    #[rstest]
    fn cursor_rejects_invalid_json_text() {
        let result: Result<Cursor, _> = serde_json::from_str("\"Z9\"");
        assert!(result.is_err());
    }

    #[rstest]
    fn cursor_page_keeps_offset_and_limit() {
        let page = Cursor::from_offset(60).page(20);
        assert_eq!(page.offset(), 60);
        assert_eq!(page.limit(), 20);
    }

    #[rstest]
    fn cursor_error_mentions_cause() {
        let err = "not valid".parse::<Cursor>().expect_err("space is invalid");
        assert!(err.to_string().starts_with("invalid cursor"));
    }
}
