//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加中の全ルームへの退出通知、空になったルームの削除、接続情報の破棄
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加した接続の切断
//! - エッジケース：最後の参加者の切断（ルームが消える）
//! - 異常系：既に破棄された接続の切断（二重切断）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, RoomDirectory, RoomId};

use super::{error::DisconnectError, fan_out::depart_room};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
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

    /// 参加者の切断を実行
    ///
    /// The connection is removed from the registry first, so a second call
    /// for the same id fails instead of announcing the departure twice.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<(RoomId, Vec<ConnectionId>)>)` - ルームごとの `user-left` 通知先
    /// * `Err(DisconnectError)` - 未登録または切断済みの接続
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<(RoomId, Vec<ConnectionId>)>, DisconnectError> {
        let connection = self.registry.forget(connection_id).await?;
        let user_name = connection.display_name.clone();

        let mut rooms: Vec<RoomId> = connection.rooms.into_iter().collect();
        rooms.sort();

        let mut departures = Vec::with_capacity(rooms.len());
        for room_id in rooms {
            let notified = depart_room(
                self.directory.as_ref(),
                self.message_pusher.as_ref(),
                &room_id,
                connection_id,
                user_name.clone(),
            )
            .await;
            departures.push((room_id, notified));
        }

        self.message_pusher.unregister_client(connection_id).await;
        tracing::info!(
            "'{}' disconnected ({} connection(s) remain)",
            connection_id,
            self.registry.count().await
        );

        Ok(departures)
    }
}
