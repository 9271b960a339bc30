//! Foamer client
//!
//! Action-based message form for the Foamer message board. Validates a draft,
//! posts it with an optional shared secret, and turns the outcome into a
//! status message.
//!
//! # Architecture
//!
//! The form is a pure state machine that:
//! - Receives events from the caller (field edits, submit, responses, ticks)
//! - Produces actions for the caller to execute (post request, show status)
//! - Uses the `Environment` trait for time (deterministic testing)
//!
//! # Components
//!
//! - [`Form`]: Form state machine
//! - [`FormEvent`]: Events fed into the form
//! - [`FormAction`]: Actions produced by the form
//! - [`Transport`]: Sends requests; [`HttpTransport`] is the `reqwest` one
//! - [`Submitter`]: Async driver tying a form to a transport
//! - [`report`]: `[kind] text` rendering and exit codes for the CLI

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod error;
mod event;
mod form;
pub mod report;
mod system_env;
mod transport;

pub use driver::Submitter;
pub use error::FormError;
pub use event::{
    FormAction, FormEvent, HttpReply, LogLevel, PostRequest, Status, StatusKind, SubmitOutcome,
};
pub use foamer_core::Environment;
pub use form::{
    AUTH_FAILED_TEXT, DEFAULT_BASE_URL, Form, FormConfig, INVALID_LENGTH_TEXT,
    MISSING_API_KEY_TEXT, SUBMITTING_TEXT, SUCCESS_HIDE_AFTER, SUCCESS_TEXT,
};
pub use system_env::SystemEnv;
pub use transport::{HttpTransport, Transport, TransportError};
