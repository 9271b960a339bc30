//! Submitter tests against an in-process transport.

use std::{
    ops::{Add, Sub},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use foamer_client::{
    AUTH_FAILED_TEXT, Environment, FormAction, FormConfig, FormError, HttpReply,
    INVALID_LENGTH_TEXT, PostRequest, SUCCESS_TEXT, StatusKind, Submitter, Transport,
    TransportError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TestInstant(Duration);

impl Add<Duration> for TestInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub for TestInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

// Test environment where sleeping advances a virtual clock
#[derive(Clone, Default)]
struct TestEnv {
    now: Arc<Mutex<Duration>>,
}

impl Environment for TestEnv {
    type Instant = TestInstant;

    fn now(&self) -> TestInstant {
        TestInstant(*self.now.lock().unwrap())
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        *self.now.lock().unwrap() += duration;
        std::future::ready(())
    }
}

/// Records every request and answers with a fixed result.
struct RecordingTransport {
    requests: Mutex<Vec<PostRequest>>,
    answer: Result<HttpReply, TransportError>,
}

impl RecordingTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            answer: Ok(HttpReply { status, body: body.to_string() }),
        }
    }

    fn failing(err: TransportError) -> Self {
        Self { requests: Mutex::new(Vec::new()), answer: Err(err) }
    }

    fn requests(&self) -> Vec<PostRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone()
    }
}

fn submitter(transport: RecordingTransport) -> Submitter<TestEnv, RecordingTransport> {
    Submitter::new(TestEnv::default(), FormConfig::default(), transport)
}

#[tokio::test]
async fn valid_submit_issues_exactly_one_post() {
    let mut submitter = submitter(RecordingTransport::replying(200, "{}"));
    submitter.set_content("hello").unwrap();
    submitter.set_api_key("s3cret").unwrap();

    let actions = submitter.submit().await.unwrap();

    let requests = submitter.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body.content, "hello");
    assert_eq!(
        requests[0].headers(),
        vec![("content-type", "application/json".to_string()), ("x-api-key", "s3cret".to_string())]
    );

    assert_eq!(actions.first(), Some(&FormAction::SetInputsEnabled(false)));
    assert_eq!(actions.last(), Some(&FormAction::SetInputsEnabled(true)));
    assert!(actions.contains(&FormAction::ClearContent));
}

#[tokio::test]
async fn invalid_content_never_reaches_transport() {
    let mut submitter = submitter(RecordingTransport::replying(200, "{}"));
    submitter.set_content("x".repeat(97)).unwrap();

    submitter.submit().await.unwrap();

    assert!(submitter.transport().requests().is_empty());
    assert_eq!(submitter.form().status().unwrap().text, INVALID_LENGTH_TEXT);
}

#[tokio::test]
async fn success_then_settle_hides_status() {
    let mut submitter = submitter(RecordingTransport::replying(200, "{}"));
    submitter.set_content("hello").unwrap();
    submitter.submit().await.unwrap();

    assert_eq!(submitter.form().status().unwrap().text, SUCCESS_TEXT);
    assert_eq!(submitter.form().content(), "");

    let actions = submitter.settle().await.unwrap();
    assert_eq!(actions, vec![FormAction::HideStatus]);
    assert!(submitter.form().status().is_none());
}

#[tokio::test]
async fn settle_without_deadline_is_noop() {
    let mut submitter = submitter(RecordingTransport::replying(403, "Invalid API key"));
    submitter.set_content("hello").unwrap();
    submitter.submit().await.unwrap();

    assert_eq!(submitter.form().status().unwrap().text, AUTH_FAILED_TEXT);
    assert!(submitter.settle().await.unwrap().is_empty());
    assert_eq!(submitter.form().content(), "hello");
}

#[tokio::test]
async fn transport_failure_surfaces_and_reenables() {
    let mut submitter = submitter(RecordingTransport::failing(TransportError::Timeout));
    submitter.set_content("hello").unwrap();

    let actions = submitter.submit().await.unwrap();

    let status = submitter.form().status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Network error: request timed out");
    assert_eq!(actions.last(), Some(&FormAction::SetInputsEnabled(true)));
    assert!(submitter.form().inputs_enabled());

    // The form accepts a retry by the user.
    assert_eq!(submitter.set_content("again"), Ok(Vec::new()));
}

#[tokio::test]
async fn server_error_body_is_shown() {
    let mut submitter = submitter(RecordingTransport::replying(500, "Internal server error: boom"));
    submitter.set_content("hello").unwrap();
    submitter.submit().await.unwrap();

    assert_eq!(submitter.form().status().unwrap().text, "Error: Internal server error: boom");
}

#[test]
fn busy_error_is_not_fatal() {
    assert!(!FormError::Busy.is_fatal());
}
