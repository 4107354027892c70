//! MessageStore trait 定義
//!
//! Chat history persistence port. Writes are best-effort from the caller's
//! point of view; reads back the history endpoint.

use async_trait::async_trait;

use super::{ChatMessage, RoomId, StoreError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: &ChatMessage) -> Result<(), StoreError>;

    /// Messages of a room ordered by delivery time ascending, at most `limit`.
    async fn find_by_room(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StoreError>;

    /// `false` when running in persistence-disabled mode.
    fn is_enabled(&self) -> bool {
        true
    }
}
