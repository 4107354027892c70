//! Chat message store implementations.
//!
//! - `sqlite`: sqlx-backed SQLite store
//! - `inmemory`: process-local store
//! - `disabled`: stand-in used when no store could be reached

mod disabled;
mod inmemory;
mod sqlite;

use std::sync::Arc;

pub use disabled::DisabledMessageStore;
pub use inmemory::InMemoryMessageStore;
pub use sqlite::SqliteMessageStore;

use crate::domain::MessageStore;

/// URL selecting the process-local store.
pub const MEMORY_STORE_URL: &str = "memory";
/// URL selecting persistence-disabled mode explicitly.
pub const DISABLED_STORE_URL: &str = "disabled";

/// Pick and connect the store named by `url`.
///
/// Never fails: if the store cannot be reached the server starts in
/// persistence-disabled mode and only the history endpoint is affected.
pub async fn connect_message_store(url: &str) -> Arc<dyn MessageStore> {
    match url.trim() {
        MEMORY_STORE_URL => {
            tracing::info!("Using in-memory message store");
            Arc::new(InMemoryMessageStore::new())
        }
        "" | DISABLED_STORE_URL => {
            tracing::warn!("Message persistence is disabled");
            Arc::new(DisabledMessageStore)
        }
        url => match SqliteMessageStore::connect(url).await {
            Ok(store) => {
                tracing::info!("Connected to message store at {}", url);
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!(
                    "Message store connection failed, continuing without persistence: {}",
                    e
                );
                Arc::new(DisabledMessageStore)
            }
        },
    }
}
