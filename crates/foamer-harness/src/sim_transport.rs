//! Scripted transport.
//!
//! Answers requests from a queue of canned replies and records every request
//! it receives.

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use foamer_client::{HttpReply, PostRequest, Transport, TransportError};

/// Transport that replays scripted results in order.
///
/// When the script runs out every request fails with a connect error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    sent: Mutex<Vec<PostRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with `status` and `body`.
    #[must_use]
    pub fn then_reply(self, status: u16, body: &str) -> Self {
        self.push(Ok(HttpReply { status, body: body.to_string() }));
        self
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn then_fail(self, err: TransportError) -> Self {
        self.push(Err(err));
        self
    }

    /// Append a result to the script.
    pub fn push(&self, result: Result<HttpReply, TransportError>) {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).push_back(result);
    }

    /// Requests received so far.
    pub fn sent(&self) -> Vec<PostRequest> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
        self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connect { reason: "no scripted reply".to_string() })
        })
    }
}
