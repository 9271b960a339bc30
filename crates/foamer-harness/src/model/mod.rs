//! Reference model for model-based testing.
//!
//! The model is a simplified implementation that captures what the message
//! form must do without actions, transports, or an environment. It serves as
//! the oracle against which the real `Form` is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Deterministic: Same inputs produce same outputs

mod form;
pub mod operation;

pub use form::{
    BAD_REQUEST_BODY, ModelForm, NETWORK_DOWN_REASON, ObservableState, SUCCESS_VISIBLE_MS,
};
pub use operation::{DraftContent, ModelReply, Operation, OperationError, OperationResult};
