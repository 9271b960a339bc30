//! Operations for model-based testing.
//!
//! Operations represent everything a user, the network, or the clock can do
//! to a form. They are generated randomly and applied to both the model and
//! the real implementation.

use arbitrary::Arbitrary;
use foamer_proto::MAX_CONTENT_CHARS;

/// Operations that can be applied to a form.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// User edits the message field.
    TypeContent {
        /// New field value.
        content: DraftContent,
    },

    /// User edits the API key field.
    TypeApiKey {
        /// Whether the field ends up non-empty.
        filled: bool,
    },

    /// User submits.
    Submit,

    /// The outstanding request completes.
    Respond {
        /// How it completes.
        reply: ModelReply,
    },

    /// Advance simulation time.
    AdvanceTime {
        /// Milliseconds to advance.
        millis: u16,
    },
}

/// Draft content, biased toward the length boundaries.
#[derive(Debug, Clone, Arbitrary)]
pub struct DraftContent {
    /// Selects the length (see [`DraftContent::to_text`]).
    pub size_class: u8,
    /// Character seed.
    pub seed: u8,
    /// Surround with spaces.
    pub padded: bool,
}

impl DraftContent {
    /// Expand to the field value.
    pub fn to_text(&self) -> String {
        let len = match self.size_class % 6 {
            0 => 0,
            1 => 1,
            2 => 40,
            3 => MAX_CONTENT_CHARS,
            4 => MAX_CONTENT_CHARS + 1,
            _ => 150,
        };

        let base = b'a' + self.seed % 26;
        let body: String = (0..len).map(|i| char::from(base + (i % 3) as u8)).collect();

        if self.padded { format!("  {body}  ") } else { body }
    }
}

/// How an outstanding request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ModelReply {
    /// 200 with a stored message.
    Accepted,
    /// 403.
    Forbidden,
    /// 400 with a text body.
    BadRequest,
    /// 500 with an empty body.
    ServerError,
    /// No reply at all.
    NetworkDown,
}

/// Result of applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation accepted.
    Ok,

    /// Operation refused.
    Error(OperationError),
}

/// Refusals that can occur during operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Inputs are disabled while a request is in flight.
    Busy,

    /// A response arrived with nothing in flight.
    NoRequestInFlight,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_lengths_hit_boundaries() {
        let lens: Vec<usize> = (0..6)
            .map(|size_class| DraftContent { size_class, seed: 0, padded: false }.to_text().len())
            .collect();
        assert_eq!(lens, [0, 1, 40, 96, 97, 150]);
    }

    #[test]
    fn padding_adds_spaces_only() {
        let draft = DraftContent { size_class: 1, seed: 3, padded: true };
        assert_eq!(draft.to_text(), "  d  ");
    }
}
