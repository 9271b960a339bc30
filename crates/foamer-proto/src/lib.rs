//! Foamer wire protocol.
//!
//! Shared vocabulary between the message client and the message service:
//! request/response bodies, the content length rule, and the header and path
//! names both sides agree on.
//!
//! # Invariants
//!
//! - A [`MessageContent`] is always trimmed and holds 1..=[`MAX_CONTENT_CHARS`]
//!   characters.
//! - Length is counted in Unicode scalar values, never bytes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod content;
mod wire;

pub use content::{ContentError, MAX_CONTENT_CHARS, MessageContent, content_char_count};
pub use wire::{DisplayMessage, Message, PostMessageRequest};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path messages are posted to and listed from.
pub const MESSAGES_PATH: &str = "/messages";

/// Path serving a display-ready message.
pub const DISPLAY_PATH: &str = "/messages/display";

/// Width of the display the service wraps messages for.
pub const DISPLAY_WIDTH: usize = 16;
