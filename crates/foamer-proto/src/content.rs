//! Message content validation.

use std::fmt;

use thiserror::Error;

/// Maximum number of characters a message may hold.
pub const MAX_CONTENT_CHARS: usize = 96;

/// Reasons content is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Nothing left after trimming.
    #[error("message content is empty")]
    Empty,

    /// More than [`MAX_CONTENT_CHARS`] characters after trimming.
    #[error("message content is {len} characters, limit is {MAX_CONTENT_CHARS}")]
    TooLong {
        /// Character count of the trimmed content.
        len: usize,
    },
}

/// Number of characters in a draft, as shown by a live counter.
///
/// Counts the raw draft (no trimming) so the counter tracks what was typed.
pub fn content_char_count(raw: &str) -> usize {
    raw.chars().count()
}

/// Validated message content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageContent(String);

impl MessageContent {
    /// Trim and validate raw input.
    pub fn parse(raw: &str) -> Result<Self, ContentError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(ContentError::Empty);
        }
        if len > MAX_CONTENT_CHARS {
            return Err(ContentError::TooLong { len });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
