//! Events fed into the form and actions it produces.

use foamer_proto::{API_KEY_HEADER, PostMessageRequest};

use crate::transport::TransportError;

/// Events the caller feeds into the [`Form`](crate::Form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent<I> {
    /// The message field now holds `content`.
    ContentChanged {
        /// Full field value.
        content: String,
    },

    /// The API key field now holds `api_key`.
    ApiKeyChanged {
        /// Full field value.
        api_key: String,
    },

    /// The user submitted the form.
    Submit,

    /// The request issued by the last [`FormAction::Post`] completed.
    ResponseReceived(SubmitOutcome),

    /// Time has passed.
    Tick {
        /// Current time.
        now: I,
    },
}

/// Raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// How a submission request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server answered.
    Reply(HttpReply),

    /// The request never produced a reply.
    TransportFailed {
        /// Human-readable failure.
        reason: String,
    },
}

impl SubmitOutcome {
    /// Convert a transport result into an outcome.
    pub fn from_result(result: Result<HttpReply, TransportError>) -> Self {
        match result {
            Ok(reply) => Self::Reply(reply),
            Err(err) => Self::TransportFailed { reason: err.to_string() },
        }
    }
}

/// Kind of status message, matching how it is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Progress notice.
    Info,
    /// Submission accepted.
    Success,
    /// Submission blocked or failed.
    Error,
}

impl StatusKind {
    /// Lowercase name, as used for styling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// User-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// How the message should be styled.
    pub kind: StatusKind,
    /// Text shown to the user.
    pub text: String,
}

impl Status {
    pub(crate) fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// A single `POST /messages` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Shared secret for the `x-api-key` header.
    pub api_key: Option<String>,
    /// JSON body.
    pub body: PostMessageRequest,
}

impl PostRequest {
    /// Headers this request carries, in send order.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("content-type", "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push((API_KEY_HEADER, key.clone()));
        }
        headers
    }
}

/// Log level for [`FormAction::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Fine-grained detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something the user will see as a failure.
    Warn,
}

/// Actions the caller must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Enable or disable the message and API key inputs.
    ///
    /// The submit button follows [`Form::can_submit`](crate::Form::can_submit)
    /// instead, which also requires valid content.
    SetInputsEnabled(bool),

    /// Display a status message, replacing any current one.
    ShowStatus(Status),

    /// Hide the status message.
    HideStatus,

    /// Empty the message field.
    ClearContent,

    /// Issue the request, then feed the result back as
    /// [`FormEvent::ResponseReceived`].
    Post(PostRequest),

    /// Emit a log line.
    Log {
        /// Severity.
        level: LogLevel,
        /// Message text.
        message: String,
    },
}
