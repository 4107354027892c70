//! UseCase: チャットメッセージ送信処理
//!
//! ## 処理の順序
//!
//! 1. サーバー時刻で `ChatMessage` を構築
//! 2. メモリ上のメンバーシップに対して即座にブロードキャスト（送信者を含む）
//! 3. 永続化を切り離されたタスクとして開始し、結果はログにのみ残す
//!
//! Step 2 never waits on step 3, so delivery survives total loss of the store.
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム全員（送信者含む）への配信と保存
//! - 異常系：ストアが書き込みに失敗する／到達できない
//! - エッジケース：ストアが遅い、送信者がルームに参加していない

use std::sync::Arc;

use tokio::task::JoinHandle;
use venti_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageContent, MessagePusher, RoomDirectory, RoomEvent, RoomId,
    Timestamp, UserName,
};

use super::{fan_out::resolve_targets, persist_message::BestEffortPersister};

/// Validated fields of an inbound `chat-message`.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub room_id: RoomId,
    pub sender_id: UserName,
    pub recipient_id: String,
    pub content: MessageContent,
}

/// What happened to one chat message.
#[derive(Debug)]
pub struct ChatDelivery {
    /// The message exactly as broadcast.
    pub message: ChatMessage,
    /// Connections the broadcast was addressed to; empty for a non-member sender.
    pub recipients: Vec<ConnectionId>,
    /// The detached persistence attempt, if one was started.
    pub persistence: Option<JoinHandle<()>>,
}

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
    persister: BestEffortPersister,
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
    pub fn new(
        directory: Arc<dyn RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        persister: BestEffortPersister,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            message_pusher,
            persister,
            clock,
        }
    }

    /// メッセージ送信を実行
    pub async fn execute(&self, sender: &ConnectionId, input: NewChatMessage) -> ChatDelivery {
        let message = ChatMessage::new(
            input.room_id,
            input.sender_id,
            input.recipient_id,
            input.content,
            Timestamp::new(self.clock.now_millis()),
        );
        let event = RoomEvent::Chat(message.clone());

        let recipients = resolve_targets(
            self.directory.as_ref(),
            &message.room_id,
            sender,
            event.fan_out(),
        )
        .await;
        if recipients.is_empty() {
            return ChatDelivery {
                message,
                recipients,
                persistence: None,
            };
        }

        // (1) in-memory fan-out
        if let Err(e) = self.message_pusher.broadcast(&recipients, &event).await {
            tracing::warn!(
                "Failed to broadcast chat message in room '{}': {}",
                message.room_id,
                e
            );
        }
        tracing::info!(
            "Chat message from '{}' delivered to {} member(s) of room '{}'",
            message.sender_id.as_str(),
            recipients.len(),
            message.room_id
        );

        // (2) detached best-effort persistence
        let persistence = Some(self.persister.persist_detached(message.clone()));

        ChatDelivery {
            message,
            recipients,
            persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageStore, MockMessageStore, StoreError},
        infrastructure::store::{DisabledMessageStore, InMemoryMessageStore},
        usecase::{
            JoinRoomUseCase,
            test_support::{Fixture, conn, drain, room},
        },
    };
    use async_trait::async_trait;
    use std::time::Duration;
    use venti_shared::time::FixedClock;

    const NOW: i64 = 1_700_000_000_000;

    fn usecase(fixture: &Fixture, store: Arc<dyn MessageStore>) -> SendChatMessageUseCase {
        SendChatMessageUseCase::new(
            fixture.directory.clone(),
            fixture.pusher.clone(),
            BestEffortPersister::new(store),
            Arc::new(FixedClock::new(NOW)),
        )
    }

    fn hi(room_name: &str) -> NewChatMessage {
        NewChatMessage {
            room_id: room(room_name),
            sender_id: UserName::new("alice".to_string()).unwrap(),
            recipient_id: "bob".to_string(),
            content: MessageContent::new("hi".to_string()).unwrap(),
        }
    }

    async fn two_members(fixture: &Fixture) -> (
        tokio::sync::mpsc::UnboundedReceiver<String>,
        tokio::sync::mpsc::UnboundedReceiver<String>,
    ) {
        let join = JoinRoomUseCase::new(
            fixture.registry.clone(),
            fixture.directory.clone(),
            fixture.pusher.clone(),
        );
        let mut rx1 = fixture.connect("c1").await;
        let mut rx2 = fixture.connect("c2").await;
        join.execute(&conn("c1"), &room("demo"), None).await.unwrap();
        join.execute(&conn("c2"), &room("demo"), None).await.unwrap();
        drain(&mut rx1);
        drain(&mut rx2);
        (rx1, rx2)
    }

    /// Store whose writes take far longer than any broadcast.
    struct SlowStore;

    #[async_trait]
    impl MessageStore for SlowStore {
        async fn insert(&self, _message: &ChatMessage) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn find_by_room(
            &self,
            _room_id: &RoomId,
            _limit: usize,
        ) -> Result<Vec<ChatMessage>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_chat_reaches_whole_room_once_and_is_stored() {
        // テスト項目: チャットは送信者を含むルーム全員に一度ずつ届き、保存される
        // given (前提条件):
        let fixture = Fixture::new();
        let (mut rx1, mut rx2) = two_members(&fixture).await;
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = usecase(&fixture, store.clone());

        // when (操作):
        let delivery = usecase.execute(&conn("c1"), hi("demo")).await;
        delivery.persistence.unwrap().await.unwrap();

        // then (期待する結果):
        assert_eq!(delivery.recipients.len(), 2);
        for rx in [&mut rx1, &mut rx2] {
            let events = drain(rx);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0]["type"], "chat-message");
            assert_eq!(events[0]["room_id"], "demo");
            assert_eq!(events[0]["sender_id"], "alice");
            assert_eq!(events[0]["content"], "hi");
            assert_eq!(events[0]["delivered_at"], NOW);
            assert_eq!(events[0]["id"], delivery.message.id.as_str());
        }
        let stored = store.find_by_room(&room("demo"), 500).await.unwrap();
        assert_eq!(stored, vec![delivery.message]);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_block_delivery() {
        // テスト項目: ストアへの書き込みが失敗してもメッセージは配信される
        // given (前提条件):
        let fixture = Fixture::new();
        let (_rx1, mut rx2) = two_members(&fixture).await;
        let mut store = MockMessageStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::WriteRejected("validation failed".to_string())));
        let usecase = usecase(&fixture, Arc::new(store));

        // when (操作):
        let delivery = usecase.execute(&conn("c1"), hi("demo")).await;
        delivery.persistence.unwrap().await.unwrap();

        // then (期待する結果):
        let events = drain(&mut rx2);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["content"], "hi");
        assert_eq!(events[0]["delivered_at"], NOW);
    }

    #[tokio::test]
    async fn test_delivery_without_any_store() {
        // テスト項目: 永続化無効モードでもメッセージは配信される
        // given (前提条件):
        let fixture = Fixture::new();
        let (mut rx1, mut rx2) = two_members(&fixture).await;
        let usecase = usecase(&fixture, Arc::new(DisabledMessageStore));

        // when (操作):
        usecase.execute(&conn("c2"), hi("demo")).await;

        // then (期待する結果):
        assert_eq!(drain(&mut rx1).len(), 1);
        assert_eq!(drain(&mut rx2).len(), 1);
    }

    #[tokio::test]
    async fn test_slow_store_does_not_delay_broadcast() {
        // テスト項目: 遅いストアの書き込み完了を待たずにブロードキャストが完了する
        // given (前提条件):
        let fixture = Fixture::new();
        let (_rx1, mut rx2) = two_members(&fixture).await;
        let usecase = usecase(&fixture, Arc::new(SlowStore));

        // when (操作):
        let delivery = tokio::time::timeout(
            Duration::from_secs(1),
            usecase.execute(&conn("c1"), hi("demo")),
        )
        .await
        .expect("broadcast must not wait for the store");

        // then (期待する結果):
        assert_eq!(drain(&mut rx2).len(), 1);
        let persistence = delivery.persistence.unwrap();
        assert!(!persistence.is_finished());
        persistence.abort();
    }

    #[tokio::test]
    async fn test_non_member_message_is_dropped() {
        // テスト項目: 参加していないルームへのメッセージは配信も保存もされない
        // given (前提条件):
        let fixture = Fixture::new();
        let (mut rx1, mut rx2) = two_members(&fixture).await;
        let mut store = MockMessageStore::new();
        store.expect_insert().never();
        let usecase = usecase(&fixture, Arc::new(store));

        // when (操作):
        let delivery = usecase.execute(&conn("c1"), hi("other-room")).await;

        // then (期待する結果):
        assert!(delivery.recipients.is_empty());
        assert!(delivery.persistence.is_none());
        assert!(drain(&mut rx1).is_empty());
        assert!(drain(&mut rx2).is_empty());
    }
}
