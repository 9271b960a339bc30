//! HTTP routes for the message service.
//!
//! ## Routes
//!
//! - `POST /messages`: store a message (shared-secret protected when a key
//!   is configured)
//! - `GET /messages`: all messages, newest first
//! - `GET /messages/display`: one random message wrapped for the display

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use foamer_core::{Storage, StorageError, wrap_lines};
use foamer_proto::{
    API_KEY_HEADER, DISPLAY_PATH, DISPLAY_WIDTH, DisplayMessage, MESSAGES_PATH, Message,
    MessageContent, PostMessageRequest,
};
use rand::seq::SliceRandom;
use tower_http::trace::TraceLayer;

/// Body returned when the API key is missing or wrong.
pub const INVALID_API_KEY_TEXT: &str = "Invalid API key";

/// Body returned when content fails validation.
pub const INVALID_CONTENT_TEXT: &str = "Message content must be between 1 and 96 characters";

/// Service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Shared secret required in the `x-api-key` header. `None` disables the
    /// check.
    pub api_key: Option<String>,
}

struct AppState<S> {
    storage: S,
    api_key: Option<String>,
}

/// Build the service router over `storage`.
pub fn router<S: Storage>(storage: S, config: ServiceConfig) -> Router {
    let state = Arc::new(AppState { storage, api_key: config.api_key });

    Router::new()
        .route(MESSAGES_PATH, get(list_messages::<S>).post(post_message::<S>))
        .route(DISPLAY_PATH, get(display_message::<S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn post_message<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    if let Some(expected) = &state.api_key {
        let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            tracing::warn!(present = provided.is_some(), "rejected message: bad API key");
            return Ok((StatusCode::FORBIDDEN, INVALID_API_KEY_TEXT).into_response());
        }
    }

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let content = match MessageContent::parse(&payload.content) {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!(%err, "rejected message");
            return Ok((StatusCode::BAD_REQUEST, INVALID_CONTENT_TEXT).into_response());
        },
    };

    let message = state.storage.put(content)?;
    tracing::info!(id = %message.id, "accepted message");
    Ok(Json(message).into_response())
}

async fn list_messages<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.storage.list_all()?))
}

async fn display_message<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DisplayMessage>, AppError> {
    let messages = state.storage.list_all()?;
    let lines = messages
        .choose(&mut rand::thread_rng())
        .map(|m| wrap_lines(&m.content, DISPLAY_WIDTH));
    Ok(Json(DisplayMessage { lines }))
}

/// Storage failure surfaced as a 500.
struct AppError(StorageError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal server error: {}", self.0))
            .into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self(err)
    }
}
