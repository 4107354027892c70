//! UseCase: ルームのメッセージ履歴取得

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageStore, RoomId};

use super::error::HistoryError;

/// Most messages returned for one room.
pub const HISTORY_LIMIT: usize = 500;

/// 履歴取得のユースケース
///
/// Reads only the store. Membership of the room is not required and a room
/// nobody is in still has its history.
pub struct GetRoomHistoryUseCase {
    store: Arc<dyn MessageStore>,
}

impl GetRoomHistoryUseCase {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Oldest-first history of `room_id`, capped at [`HISTORY_LIMIT`].
    pub async fn execute(&self, room_id: &RoomId) -> Result<Vec<ChatMessage>, HistoryError> {
        let messages = self.store.find_by_room(room_id, HISTORY_LIMIT).await?;
        tracing::debug!(
            "Fetched {} message(s) of room '{}'",
            messages.len(),
            room_id
        );
        Ok(messages)
    }

    pub fn persistence_enabled(&self) -> bool {
        self.store.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MockMessageStore, StoreError, Timestamp, UserName};
    use crate::infrastructure::store::{DisabledMessageStore, InMemoryMessageStore};
    use crate::usecase::test_support::room;

    fn message(room_name: &str, content: &str, at: i64) -> ChatMessage {
        ChatMessage::new(
            room(room_name),
            UserName::new("alice".to_string()).unwrap(),
            String::new(),
            MessageContent::new(content.to_string()).unwrap(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_history_is_oldest_first_for_one_room() {
        // テスト項目: 履歴は対象ルームのメッセージのみを古い順に返す
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new());
        store.insert(&message("r1", "second", 2000)).await.unwrap();
        store.insert(&message("r2", "elsewhere", 1500)).await.unwrap();
        store.insert(&message("r1", "first", 1000)).await.unwrap();
        let usecase = GetRoomHistoryUseCase::new(store);

        // when (操作):
        let history = usecase.execute(&room("r1")).await.unwrap();

        // then (期待する結果):
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        // テスト項目: 履歴は最大 500 件に制限される
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new());
        for i in 0..(HISTORY_LIMIT as i64 + 20) {
            store.insert(&message("busy", "m", i)).await.unwrap();
        }
        let usecase = GetRoomHistoryUseCase::new(store);

        // when (操作):
        let history = usecase.execute(&room("busy")).await.unwrap();

        // then (期待する結果):
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].delivered_at, Timestamp::new(0));
    }

    #[tokio::test]
    async fn test_unknown_room_has_empty_history() {
        // テスト項目: メッセージのないルームの履歴は空
        // given (前提条件):
        let usecase = GetRoomHistoryUseCase::new(Arc::new(InMemoryMessageStore::new()));

        // when (操作):
        let history = usecase.execute(&room("never-used")).await.unwrap();

        // then (期待する結果):
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_store_errors_are_reported() {
        // テスト項目: ストアの読み出し失敗はエラーとして返る
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_find_by_room()
            .withf(|_, limit| *limit == HISTORY_LIMIT)
            .returning(|_, _| Err(StoreError::QueryFailed("locked".to_string())));
        store.expect_is_enabled().return_const(true);
        let usecase = GetRoomHistoryUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute(&room("r1")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(HistoryError::Store(StoreError::QueryFailed("locked".to_string())))
        );
        assert!(usecase.persistence_enabled());
    }

    #[tokio::test]
    async fn test_disabled_store_fails_history() {
        // テスト項目: 永続化無効モードでは履歴取得がエラーになる
        // given (前提条件):
        let usecase = GetRoomHistoryUseCase::new(Arc::new(DisabledMessageStore));

        // when (操作):
        let result = usecase.execute(&room("r1")).await;

        // then (期待する結果):
        assert_eq!(result, Err(HistoryError::Store(StoreError::Unavailable)));
        assert!(!usecase.persistence_enabled());
    }
}
