//! HTTP transport for form submissions.
//!
//! The form never performs I/O. Its [`FormAction::Post`](crate::FormAction)
//! is handed to a [`Transport`], and whatever comes back (any status code, or
//! a failure to get one) is fed back into the form.

use async_trait::async_trait;
use thiserror::Error;

use crate::event::{HttpReply, PostRequest};

/// Errors that prevent a reply from being received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not reach the server.
    #[error("could not connect: {reason}")]
    Connect {
        /// Underlying error text.
        reason: String,
    },

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request failed before a status was received.
    #[error("request failed: {reason}")]
    Request {
        /// Underlying error text.
        reason: String,
    },

    /// The status arrived but the body could not be read.
    #[error("could not read response body: {reason}")]
    Body {
        /// Underlying error text.
        reason: String,
    },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect { reason: err.to_string() }
        } else if err.is_body() || err.is_decode() {
            Self::Body { reason: err.to_string() }
        } else {
            Self::Request { reason: err.to_string() }
        }
    }
}

/// Sends submission requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the reply, whatever its status.
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.json(&request.body).send().await?;
        let status = response.status().as_u16();
        let body =
            response.text().await.map_err(|e| TransportError::Body { reason: e.to_string() })?;

        tracing::debug!(status, url = %request.url, "submission reply");
        Ok(HttpReply { status, body })
    }
}
