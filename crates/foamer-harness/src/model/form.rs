//! Reference form.
//!
//! Tracks the form with plain fields and millisecond arithmetic. No actions,
//! no environment - just the observable state transitions.

use foamer_client::{
    AUTH_FAILED_TEXT, INVALID_LENGTH_TEXT, MISSING_API_KEY_TEXT, SUBMITTING_TEXT, SUCCESS_TEXT,
    StatusKind,
};
use foamer_proto::MAX_CONTENT_CHARS;

use super::operation::{ModelReply, OperationError, OperationResult};

/// Milliseconds a success status stays visible.
pub const SUCCESS_VISIBLE_MS: u64 = 3000;

/// Body the model pretends a 400 carries.
pub const BAD_REQUEST_BODY: &str = "Message content must be between 1 and 96 characters";

/// Reason the model pretends a network failure carries.
pub const NETWORK_DOWN_REASON: &str = "could not connect: connection refused";

/// Everything a user could see, compared between model and real form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Message field value.
    pub content: String,
    /// Whether inputs are enabled.
    pub inputs_enabled: bool,
    /// Whether the submit button is enabled.
    pub can_submit: bool,
    /// Displayed status.
    pub status: Option<(StatusKind, String)>,
}

/// Reference implementation of the message form.
#[derive(Debug, Clone)]
pub struct ModelForm {
    requires_api_key: bool,
    content: String,
    api_key_filled: bool,
    in_flight: bool,
    status: Option<(StatusKind, String)>,
    hide_at_ms: Option<u64>,
    now_ms: u64,
    posts: usize,
}

impl ModelForm {
    /// Create an empty model form.
    pub fn new(requires_api_key: bool) -> Self {
        Self {
            requires_api_key,
            content: String::new(),
            api_key_filled: false,
            in_flight: false,
            status: None,
            hide_at_ms: None,
            now_ms: 0,
            posts: 0,
        }
    }

    /// Requests issued so far.
    pub fn posts(&self) -> usize {
        self.posts
    }

    /// Whether a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Observable state.
    pub fn observe(&self) -> ObservableState {
        let len = self.content.chars().count();
        ObservableState {
            content: self.content.clone(),
            inputs_enabled: !self.in_flight,
            can_submit: !self.in_flight && (1..=MAX_CONTENT_CHARS).contains(&len),
            status: self.status.clone(),
        }
    }

    /// User edits the message field.
    pub fn type_content(&mut self, content: String) -> OperationResult {
        if self.in_flight {
            return OperationResult::Error(OperationError::Busy);
        }
        self.content = content;
        OperationResult::Ok
    }

    /// User edits the API key field.
    pub fn type_api_key(&mut self, filled: bool) -> OperationResult {
        if self.in_flight {
            return OperationResult::Error(OperationError::Busy);
        }
        self.api_key_filled = filled;
        OperationResult::Ok
    }

    /// User submits.
    pub fn submit(&mut self) -> OperationResult {
        if self.in_flight {
            return OperationResult::Error(OperationError::Busy);
        }

        let len = self.content.trim().chars().count();
        if !(1..=MAX_CONTENT_CHARS).contains(&len) {
            self.show(StatusKind::Error, INVALID_LENGTH_TEXT);
        } else if self.requires_api_key && !self.api_key_filled {
            self.show(StatusKind::Error, MISSING_API_KEY_TEXT);
        } else {
            self.in_flight = true;
            self.posts += 1;
            self.show(StatusKind::Info, SUBMITTING_TEXT);
        }
        OperationResult::Ok
    }

    /// The outstanding request completes.
    pub fn respond(&mut self, reply: ModelReply) -> OperationResult {
        if !self.in_flight {
            return OperationResult::Error(OperationError::NoRequestInFlight);
        }
        self.in_flight = false;

        match reply {
            ModelReply::Accepted => {
                self.show(StatusKind::Success, SUCCESS_TEXT);
                self.hide_at_ms = Some(self.now_ms + SUCCESS_VISIBLE_MS);
                self.content.clear();
            },
            ModelReply::Forbidden => self.show(StatusKind::Error, AUTH_FAILED_TEXT),
            ModelReply::BadRequest => {
                self.show(StatusKind::Error, &format!("Error: {BAD_REQUEST_BODY}"));
            },
            ModelReply::ServerError => self.show(StatusKind::Error, "Error: HTTP 500"),
            ModelReply::NetworkDown => {
                self.show(StatusKind::Error, &format!("Network error: {NETWORK_DOWN_REASON}"));
            },
        }
        OperationResult::Ok
    }

    /// Time passes.
    pub fn advance(&mut self, millis: u64) {
        self.now_ms += millis;
        if self.hide_at_ms.is_some_and(|at| self.now_ms >= at) {
            self.status = None;
            self.hide_at_ms = None;
        }
    }

    fn show(&mut self, kind: StatusKind, text: &str) {
        self.status = Some((kind, text.to_string()));
        self.hide_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_hides_after_three_seconds() {
        let mut model = ModelForm::new(false);
        model.type_content("hi".to_string());
        model.submit();
        model.respond(ModelReply::Accepted);

        model.advance(2999);
        assert!(model.observe().status.is_some());
        model.advance(1);
        assert!(model.observe().status.is_none());
    }

    #[test]
    fn respond_without_request_refused() {
        let mut model = ModelForm::new(false);
        assert_eq!(
            model.respond(ModelReply::Accepted),
            OperationResult::Error(OperationError::NoRequestInFlight)
        );
    }
}
