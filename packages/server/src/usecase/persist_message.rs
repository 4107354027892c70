//! Persistence Adapter: best-effort write-through for chat messages.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{ChatMessage, MessageStore, StoreError};

/// Fires detached inserts whose outcome is only ever logged.
pub struct BestEffortPersister {
    store: Arc<dyn MessageStore>,
}

impl BestEffortPersister {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Spawn the insert on its own task and return immediately.
    ///
    /// The handle is for callers that want to observe completion (tests); the
    /// chat flow drops it.
    pub fn persist_detached(&self, message: ChatMessage) -> JoinHandle<()> {
        let store = self.store.clone();
        tokio::spawn(async move {
            match store.insert(&message).await {
                Ok(()) => tracing::debug!(
                    "Persisted message '{}' in room '{}'",
                    message.id.as_str(),
                    message.room_id
                ),
                Err(StoreError::Unavailable) => tracing::debug!(
                    "Persistence disabled, message '{}' not stored",
                    message.id.as_str()
                ),
                Err(e) => tracing::warn!(
                    "Failed to persist message '{}': {}",
                    message.id.as_str(),
                    e
                ),
            }
        })
    }
}
