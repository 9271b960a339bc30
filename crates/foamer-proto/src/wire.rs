//! JSON bodies exchanged over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /messages`.
///
/// `content` is a plain string on the wire so the service can answer
/// malformed lengths with its own error text instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageRequest {
    /// Message text.
    pub content: String,
}

/// A stored message, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: String,
    /// Message text.
    pub content: String,
    /// When the service accepted the message.
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /messages/display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    /// Wrapped lines of one stored message, `None` when nothing is stored.
    pub lines: Option<Vec<String>>,
}
