//! UseCase: 接続受付処理
//!
//! Allocates the connection id, registers the connection with the Connection
//! Registry and the MessagePusher, and greets the client with its id.

use std::sync::Arc;

use venti_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, ConnectionIdFactory, ConnectionRegistry, MessagePusher,
    PusherChannel, RoomEvent, Timestamp,
};

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// The identifier assigned to the new connection.
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        self.registry
            .register(Connection::new(connection_id.clone(), connected_at))
            .await;
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        let greeting = RoomEvent::Connected {
            user_id: connection_id.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &greeting).await {
            tracing::warn!("Failed to greet '{}': {}", connection_id, e);
        }

        connection_id
    }
}
