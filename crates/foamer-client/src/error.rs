//! Form error types.

use thiserror::Error;

/// Errors from feeding events into the form.
///
/// Rejected input (bad length, missing API key) is not an error: the form
/// answers it with a visible status. These variants mean the caller fed an
/// event the form cannot accept in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Inputs are disabled while a request is in flight.
    #[error("a submission is already in flight")]
    Busy,

    /// A response arrived with no request outstanding.
    #[error("response received with no request in flight")]
    NoRequestInFlight,
}

impl FormError {
    /// Returns true if this error indicates a driver bug rather than a user
    /// racing the form.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Busy => false,
            Self::NoRequestInFlight => true,
        }
    }
}
