//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, RoomDirectory, RoomId};

use super::{error::LeaveRoomError, fan_out::depart_room};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
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

    /// ルーム退出を実行
    ///
    /// Leaving a room the connection is not in is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - `user-left` を受け取った接続
    /// * `Err(LeaveRoomError)` - 未登録の接続
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, LeaveRoomError> {
        self.registry.joined_rooms(connection_id).await?;
        if !self.directory.is_member(room_id, connection_id).await {
            return Ok(Vec::new());
        }

        let user_name = self.registry.display_name(connection_id).await;
        let notified = depart_room(
            self.directory.as_ref(),
            self.message_pusher.as_ref(),
            room_id,
            connection_id,
            user_name,
        )
        .await;
        self.registry.record_leave(connection_id, room_id).await?;

        Ok(notified)
    }
}
