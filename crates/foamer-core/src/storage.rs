//! Message storage.
//!
//! Messages live in process memory only. The store is cheap to clone and
//! every clone sees the same messages, so a service can hand one to each
//! request handler.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use chrono::Utc;
use foamer_proto::{Message, MessageContent};
use thiserror::Error;
use uuid::Uuid;

/// Errors from storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No message with this ID.
    #[error("message not found: {id}")]
    NotFound {
        /// The ID that was looked up.
        id: String,
    },
}

/// Storage backend for messages.
pub trait Storage: Clone + Send + Sync + 'static {
    /// Store new content, assigning an ID and creation time.
    fn put(&self, content: MessageContent) -> Result<Message, StorageError>;

    /// Fetch a message by ID.
    fn get(&self, id: &str) -> Result<Message, StorageError>;

    /// All messages, newest first.
    fn list_all(&self) -> Result<Vec<Message>, StorageError>;

    /// Remove a message. Returns whether it existed.
    fn delete(&self, id: &str) -> Result<bool, StorageError>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    messages: Arc<RwLock<HashMap<String, Message>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn put(&self, content: MessageContent) -> Result<Message, StorageError> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            content: content.into_inner(),
            created_at: Utc::now(),
        };

        // A panic while holding the lock cannot leave a half-written entry.
        let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        messages.insert(message.id.clone(), message.clone());
        tracing::debug!(id = %message.id, "stored message");

        Ok(message)
    }

    fn get(&self, id: &str) -> Result<Message, StorageError> {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        messages.get(id).cloned().ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    fn list_all(&self) -> Result<Vec<Message>, StorageError> {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<Message> = messages.values().cloned().collect();

        // Newest first; ID breaks ties so the order is stable.
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(all)
    }

    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        Ok(messages.remove(id).is_some())
    }
}
