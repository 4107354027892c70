//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの遅延作成、冪等な参加、参加通知と参加者スナップショット
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加、既存ルームへの参加
//! - エッジケース：同じルームへの二重参加（通知なし）
//! - 異常系：未登録の接続からの参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, Member, MessagePusher, RoomDirectory, RoomEvent, RoomId,
    UserName,
};

use super::error::JoinRoomError;

/// Result of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// `false` when the connection was already a member (nothing happened).
    pub newly_joined: bool,
    /// Members that received `user-joined`.
    pub notified: Vec<ConnectionId>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        directory: Arc<dyn RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            directory,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `room_id` - 参加先ルーム（存在しなければ作成される）
    /// * `user_name` - 表示名（最初に設定された値が優先）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        user_name: Option<UserName>,
    ) -> Result<JoinOutcome, JoinRoomError> {
        // 1. 接続が登録済みであることを確認し、表示名を確定
        self.registry.joined_rooms(connection_id).await?;
        let user_name = match user_name {
            Some(name) => Some(self.registry.set_display_name(connection_id, name).await?),
            None => self.registry.display_name(connection_id).await,
        };

        // 2. Room Directory に追加（既に参加済みなら何もしない）
        if !self.directory.join(room_id, connection_id).await {
            tracing::debug!("'{}' is already in room '{}'", connection_id, room_id);
            return Ok(JoinOutcome {
                newly_joined: false,
                notified: Vec::new(),
            });
        }
        if let Err(e) = self
            .registry
            .record_join(connection_id, room_id.clone())
            .await
        {
            self.directory.leave(room_id, connection_id).await;
            return Err(e.into());
        }
        tracing::info!("'{}' joined room '{}'", connection_id, room_id);

        // 3. 参加者スナップショットを本人に送信
        let snapshot = RoomEvent::RoomJoined {
            room_id: room_id.clone(),
            user_id: connection_id.clone(),
            members: self.build_member_list(room_id).await,
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &snapshot).await {
            tracing::warn!("Failed to send room snapshot to '{}': {}", connection_id, e);
        }

        // 4. 他の参加者に user-joined をブロードキャスト
        let notified = self.directory.members_except(room_id, connection_id).await;
        let joined = RoomEvent::UserJoined {
            room_id: room_id.clone(),
            user_id: connection_id.clone(),
            user_name,
        };
        if let Err(e) = self.message_pusher.broadcast(&notified, &joined).await {
            tracing::warn!("Failed to broadcast user-joined: {}", e);
        }

        Ok(JoinOutcome {
            newly_joined: true,
            notified,
        })
    }

    /// Members of the room with their display names, sorted by id.
    async fn build_member_list(&self, room_id: &RoomId) -> Vec<Member> {
        let mut ids = self.directory.members(room_id).await;
        ids.sort();

        let mut members = Vec::with_capacity(ids.len());
        for user_id in ids {
            let user_name = self.registry.display_name(&user_id).await;
            members.push(Member { user_id, user_name });
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::usecase::test_support::{Fixture, conn, drain, drain_types, room};

    fn usecase(fixture: &Fixture) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            fixture.registry.clone(),
            fixture.directory.clone(),
            fixture.pusher.clone(),
        )
    }

    fn name(value: &str) -> Option<UserName> {
        Some(UserName::new(value.to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_first_join_creates_room_and_sends_snapshot() {
        // テスト項目: 最初の参加でルームが作成され、本人にスナップショットが届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;

        // when (操作):
        let outcome = usecase(&fixture)
            .execute(&conn("c1"), &room("demo"), name("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.newly_joined);
        assert!(outcome.notified.is_empty());
        assert!(fixture.directory.room_exists(&room("demo")).await);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "room-joined");
        assert_eq!(
            events[0]["members"],
            serde_json::json!([{"user_id": "c1", "user_name": "alice"}])
        );
    }

    #[tokio::test]
    async fn test_join_announces_to_others_only() {
        // テスト項目: 参加通知は本人以外の参加者にのみ届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx1 = fixture.connect("c1").await;
        let mut rx2 = fixture.connect("c2").await;
        let usecase = usecase(&fixture);
        usecase
            .execute(&conn("c1"), &room("demo"), name("alice"))
            .await
            .unwrap();
        drain(&mut rx1);

        // when (操作):
        let outcome = usecase
            .execute(&conn("c2"), &room("demo"), name("bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.notified, vec![conn("c1")]);
        let to_alice = drain(&mut rx1);
        assert_eq!(to_alice.len(), 1);
        assert_eq!(to_alice[0]["type"], "user-joined");
        assert_eq!(to_alice[0]["user_id"], "c2");
        assert_eq!(to_alice[0]["user_name"], "bob");
        assert_eq!(drain_types(&mut rx2), vec!["room-joined"]);
    }

    #[tokio::test]
    async fn test_duplicate_join_is_silent() {
        // テスト項目: 同じルームへの二重参加では誰にも通知されない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx1 = fixture.connect("c1").await;
        let mut rx2 = fixture.connect("c2").await;
        let usecase = usecase(&fixture);
        usecase.execute(&conn("c1"), &room("demo"), None).await.unwrap();
        usecase.execute(&conn("c2"), &room("demo"), None).await.unwrap();
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作):
        let outcome = usecase
            .execute(&conn("c2"), &room("demo"), None)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!outcome.newly_joined);
        assert!(drain(&mut rx1).is_empty());
        assert!(drain(&mut rx2).is_empty());
        assert_eq!(fixture.directory.members(&room("demo")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_display_name_first_value_wins_across_joins() {
        // テスト項目: 表示名は最初の join で設定された値が以降も使われる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx1 = fixture.connect("c1").await;
        let _rx2 = fixture.connect("c2").await;
        let usecase = usecase(&fixture);
        usecase
            .execute(&conn("c1"), &room("a"), name("alice"))
            .await
            .unwrap();
        usecase.execute(&conn("c1"), &room("b"), None).await.unwrap();
        drain(&mut rx1);

        // when (操作):
        usecase
            .execute(&conn("c2"), &room("b"), name("bob"))
            .await
            .unwrap();
        usecase
            .execute(&conn("c2"), &room("a"), name("robert"))
            .await
            .unwrap();

        // then (期待する結果):
        let events = drain(&mut rx1);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e["user_name"] == "bob"));
    }

    #[tokio::test]
    async fn test_unknown_connection_cannot_join() {
        // テスト項目: 未登録の接続は参加できず、ルームも作成されない
        // given (前提条件):
        let fixture = Fixture::new();

        // when (操作):
        let result = usecase(&fixture)
            .execute(&conn("ghost"), &room("demo"), None)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::Repository(RepositoryError::UnknownConnection(
                "ghost".to_string()
            )))
        );
        assert!(!fixture.directory.room_exists(&room("demo")).await);
    }
}
