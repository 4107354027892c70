use async_trait::async_trait;

use crate::domain::{ChatMessage, MessageStore, RoomId, StoreError};

/// Store used in persistence-disabled mode; every call reports `Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMessageStore;

#[async_trait]
impl MessageStore for DisabledMessageStore {
    async fn insert(&self, _message: &ChatMessage) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn find_by_room(
        &self,
        _room_id: &RoomId,
        _limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
