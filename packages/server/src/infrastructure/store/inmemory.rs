//! InMemory MessageStore 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, RoomId, StoreError};

/// インメモリ MessageStore 実装
///
/// Keeps every message in insertion order; history is lost on restart.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: &ChatMessage) -> Result<(), StoreError> {
        self.messages.lock().await.push(message.clone());
        Ok(())
    }

    async fn find_by_room(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        let mut found: Vec<ChatMessage> = messages
            .iter()
            .filter(|m| &m.room_id == room_id)
            .cloned()
            .collect();
        // stable: equal timestamps keep insertion order
        found.sort_by_key(|m| m.delivered_at);
        found.truncate(limit);
        Ok(found)
    }
}
