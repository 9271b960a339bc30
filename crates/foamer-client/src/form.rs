//! Message form state machine.
//!
//! The `Form` holds the state of a message-submission form: the draft
//! content, the optional API key, whether a request is in flight, and the
//! status message currently shown. It performs no I/O. Each event returns the
//! actions the caller must execute.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──Submit (valid)──▶ InFlight ──ResponseReceived──▶ Idle
//!    │                                                       │
//!    └──Submit (invalid)──▶ Idle + error status              └─▶ status (success auto-hides)
//! ```
//!
//! # Invariants
//!
//! - At most one request is in flight. Inputs are disabled for its duration.
//! - Every accepted submit produces exactly one `Post` action.
//! - Every response re-enables the inputs, whatever the outcome.
//! - Only success statuses auto-hide, and a hide deadline only ever applies
//!   to the status it was set for.

use std::time::Duration;

use foamer_core::Environment;
use foamer_proto::{
    MAX_CONTENT_CHARS, MESSAGES_PATH, MessageContent, PostMessageRequest, content_char_count,
};

use crate::{
    error::FormError,
    event::{
        FormAction, FormEvent, HttpReply, LogLevel, PostRequest, Status, StatusKind, SubmitOutcome,
    },
};

/// Server the form posts to when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// How long a success message stays visible.
pub const SUCCESS_HIDE_AFTER: Duration = Duration::from_secs(3);

/// Status shown when content is empty or too long.
pub const INVALID_LENGTH_TEXT: &str = "Message must be between 1 and 96 characters";

/// Status shown when the API key field is required but empty.
pub const MISSING_API_KEY_TEXT: &str = "API key is required";

/// Status shown while a request is in flight.
pub const SUBMITTING_TEXT: &str = "Submitting...";

/// Status shown after a successful submission.
pub const SUCCESS_TEXT: &str = "Message submitted successfully!";

/// Status shown when the server rejects the API key.
pub const AUTH_FAILED_TEXT: &str = "Authentication failed: invalid API key";

/// Form configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Base URL of the message service, without trailing path.
    pub base_url: String,
    /// Whether the form has an API key field that must be filled.
    pub requires_api_key: bool,
    /// How long success messages stay visible.
    pub success_hide_after: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            requires_api_key: false,
            success_hide_after: SUCCESS_HIDE_AFTER,
        }
    }
}

impl FormConfig {
    /// Full URL of the submission endpoint.
    pub fn messages_url(&self) -> String {
        format!("{}{MESSAGES_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// Status currently displayed, with its auto-hide deadline.
#[derive(Debug, Clone)]
struct DisplayedStatus<I> {
    status: Status,
    hide_at: Option<I>,
}

/// Message form state machine.
///
/// Pure state machine - returns actions, caller handles I/O.
///
/// # Type Parameters
///
/// - `E`: Environment implementation for time
pub struct Form<E: Environment> {
    config: FormConfig,
    env: E,
    content: String,
    api_key: String,
    in_flight: bool,
    status: Option<DisplayedStatus<E::Instant>>,
}

impl<E: Environment> Form<E> {
    /// Create an empty form.
    pub fn new(env: E, config: FormConfig) -> Self {
        Self {
            config,
            env,
            content: String::new(),
            api_key: String::new(),
            in_flight: false,
            status: None,
        }
    }

    /// Form configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Current message field value.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current API key field value.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Live character counter.
    pub fn char_count(&self) -> usize {
        content_char_count(&self.content)
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        let count = self.char_count();
        !self.in_flight && count > 0 && count <= MAX_CONTENT_CHARS
    }

    /// Whether inputs accept edits.
    pub fn inputs_enabled(&self) -> bool {
        !self.in_flight
    }

    /// Whether a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Status message currently shown, if any.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref().map(|s| &s.status)
    }

    /// When the current status will hide itself, if it will.
    pub fn hide_deadline(&self) -> Option<E::Instant> {
        self.status.as_ref().and_then(|s| s.hide_at)
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the event cannot be accepted in the current
    /// state. The form is left unchanged in that case.
    pub fn handle(&mut self, event: FormEvent<E::Instant>) -> Result<Vec<FormAction>, FormError> {
        match event {
            FormEvent::ContentChanged { content } => {
                self.ensure_idle()?;
                self.content = content;
                Ok(Vec::new())
            },
            FormEvent::ApiKeyChanged { api_key } => {
                self.ensure_idle()?;
                self.api_key = api_key;
                Ok(Vec::new())
            },
            FormEvent::Submit => self.handle_submit(),
            FormEvent::ResponseReceived(outcome) => self.handle_response(outcome),
            FormEvent::Tick { now } => Ok(self.handle_tick(now)),
        }
    }

    fn ensure_idle(&self) -> Result<(), FormError> {
        if self.in_flight { Err(FormError::Busy) } else { Ok(()) }
    }

    /// Handle a submit: validate, then issue exactly one request.
    fn handle_submit(&mut self) -> Result<Vec<FormAction>, FormError> {
        self.ensure_idle()?;

        let content = match MessageContent::parse(&self.content) {
            Ok(content) => content,
            Err(err) => {
                return Ok(vec![
                    self.show(StatusKind::Error, INVALID_LENGTH_TEXT),
                    FormAction::Log {
                        level: LogLevel::Debug,
                        message: format!("submit blocked: {err}"),
                    },
                ]);
            },
        };

        let key = self.api_key.trim();
        let api_key = (!key.is_empty()).then(|| key.to_string());
        if api_key.is_none() && self.config.requires_api_key {
            return Ok(vec![
                self.show(StatusKind::Error, MISSING_API_KEY_TEXT),
                FormAction::Log {
                    level: LogLevel::Debug,
                    message: "submit blocked: API key missing".to_string(),
                },
            ]);
        }

        self.in_flight = true;

        let request = PostRequest {
            url: self.config.messages_url(),
            api_key,
            body: PostMessageRequest { content: content.into_inner() },
        };
        let log = FormAction::Log {
            level: LogLevel::Info,
            message: format!(
                "submitting {} chars to {}",
                content_char_count(&request.body.content),
                request.url
            ),
        };

        Ok(vec![
            FormAction::SetInputsEnabled(false),
            self.show(StatusKind::Info, SUBMITTING_TEXT),
            log,
            FormAction::Post(request),
        ])
    }

    /// Handle the end of the in-flight request.
    fn handle_response(&mut self, outcome: SubmitOutcome) -> Result<Vec<FormAction>, FormError> {
        if !self.in_flight {
            return Err(FormError::NoRequestInFlight);
        }
        self.in_flight = false;

        let mut actions = Vec::new();
        match outcome {
            SubmitOutcome::Reply(HttpReply { status, .. }) if (200..300).contains(&status) => {
                actions.push(self.show(StatusKind::Success, SUCCESS_TEXT));
                self.content.clear();
                actions.push(FormAction::ClearContent);
                actions.push(FormAction::Log {
                    level: LogLevel::Info,
                    message: format!("submission accepted ({status})"),
                });
            },
            SubmitOutcome::Reply(HttpReply { status: 403, .. }) => {
                actions.push(self.show(StatusKind::Error, AUTH_FAILED_TEXT));
                actions.push(FormAction::Log {
                    level: LogLevel::Warn,
                    message: "submission rejected: API key not accepted".to_string(),
                });
            },
            SubmitOutcome::Reply(HttpReply { status, body }) => {
                let detail = if body.trim().is_empty() { format!("HTTP {status}") } else { body };
                actions.push(self.show(StatusKind::Error, format!("Error: {detail}")));
                actions.push(FormAction::Log {
                    level: LogLevel::Warn,
                    message: format!("submission failed with status {status}"),
                });
            },
            SubmitOutcome::TransportFailed { reason } => {
                actions.push(FormAction::Log {
                    level: LogLevel::Warn,
                    message: format!("submission failed: {reason}"),
                });
                actions.push(self.show(StatusKind::Error, format!("Network error: {reason}")));
            },
        }

        actions.push(FormAction::SetInputsEnabled(true));
        Ok(actions)
    }

    fn handle_tick(&mut self, now: E::Instant) -> Vec<FormAction> {
        match self.hide_deadline() {
            Some(hide_at) if now >= hide_at => {
                self.status = None;
                vec![FormAction::HideStatus]
            },
            _ => Vec::new(),
        }
    }

    /// Replace the displayed status. Any earlier hide deadline is dropped with
    /// the status it belonged to.
    fn show(&mut self, kind: StatusKind, text: impl Into<String>) -> FormAction {
        let status = Status::new(kind, text);
        let hide_at = match kind {
            StatusKind::Success => Some(self.env.now() + self.config.success_hide_after),
            StatusKind::Info | StatusKind::Error => None,
        };
        self.status = Some(DisplayedStatus { status: status.clone(), hide_at });
        FormAction::ShowStatus(status)
    }
}
