//! Fuzz target for the [`Form`] state machine
//!
//! Prevent double submission and stuck inputs via arbitrary event orderings
//!
//! # Strategy
//!
//! - Arbitrary drafts: any unicode, any length, including whitespace-only
//! - Out-of-order responses: replies with nothing in flight, repeated replies
//! - Timing: advance the clock between events to cross auto-hide deadlines
//!
//! # Invariants
//!
//! - `Post` is emitted ONLY for trimmed content of 1..=96 characters
//! - Never two requests in flight
//! - Every response re-enables the inputs
//! - A rejected event leaves the form unchanged
//! - NEVER panic on any event sequence

#![no_main]

use std::{
    ops::{Add, Sub},
    sync::{Arc, Mutex},
    time::Duration,
};

use arbitrary::Arbitrary;
use foamer_client::{Form, FormAction, FormConfig, FormEvent, HttpReply, SubmitOutcome};
use foamer_core::Environment;
use foamer_proto::MAX_CONTENT_CHARS;
use libfuzzer_sys::fuzz_target;

/// Represents time as Duration since epoch 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FuzzInstant(Duration);

impl Add<Duration> for FuzzInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub for FuzzInstant {
    type Output = Duration;

    fn sub(self, other: Self) -> Duration {
        self.0.saturating_sub(other.0)
    }
}

#[derive(Clone, Default)]
struct FuzzEnv {
    now: Arc<Mutex<Duration>>,
}

impl Environment for FuzzEnv {
    type Instant = FuzzInstant;

    fn now(&self) -> FuzzInstant {
        FuzzInstant(*self.now.lock().unwrap())
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        *self.now.lock().unwrap() += duration;
        std::future::ready(())
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Content(String),
    ApiKey(String),
    Submit,
    Reply { status: u16, body: String },
    NetworkDown(String),
    Tick { advance_ms: u16 },
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    requires_api_key: bool,
    events: Vec<FuzzEvent>,
}

fuzz_target!(|input: FuzzInput| {
    let env = FuzzEnv::default();
    let config = FormConfig { requires_api_key: input.requires_api_key, ..FormConfig::default() };
    let mut form = Form::new(env.clone(), config);

    for event in input.events {
        let was_in_flight = form.is_in_flight();
        let content_before = form.content().to_string();

        let is_response = matches!(event, FuzzEvent::Reply { .. } | FuzzEvent::NetworkDown(_));
        let event = match event {
            FuzzEvent::Content(content) => FormEvent::ContentChanged { content },
            FuzzEvent::ApiKey(api_key) => FormEvent::ApiKeyChanged { api_key },
            FuzzEvent::Submit => FormEvent::Submit,
            FuzzEvent::Reply { status, body } => {
                FormEvent::ResponseReceived(SubmitOutcome::Reply(HttpReply { status, body }))
            },
            FuzzEvent::NetworkDown(reason) => {
                FormEvent::ResponseReceived(SubmitOutcome::TransportFailed { reason })
            },
            FuzzEvent::Tick { advance_ms } => {
                *env.now.lock().unwrap() += Duration::from_millis(u64::from(advance_ms));
                FormEvent::Tick { now: env.now() }
            },
        };

        match form.handle(event) {
            Ok(actions) => {
                let posts: Vec<_> = actions
                    .iter()
                    .filter_map(|a| match a {
                        FormAction::Post(req) => Some(req),
                        _ => None,
                    })
                    .collect();

                assert!(posts.len() <= 1, "one event produced {} posts", posts.len());
                if let Some(req) = posts.first() {
                    assert!(!was_in_flight, "posted while a request was in flight");
                    let len = req.body.content.chars().count();
                    assert!((1..=MAX_CONTENT_CHARS).contains(&len), "posted {len} chars");
                    assert_eq!(req.body.content.trim(), req.body.content);
                    assert!(form.is_in_flight());
                }

                if is_response {
                    assert!(!form.is_in_flight());
                    assert_eq!(actions.last(), Some(&FormAction::SetInputsEnabled(true)));
                }
            },
            Err(_) => {
                assert_eq!(form.is_in_flight(), was_in_flight);
                assert_eq!(form.content(), content_before);
            },
        }

        assert_eq!(form.inputs_enabled(), !form.is_in_flight());
    }
});
