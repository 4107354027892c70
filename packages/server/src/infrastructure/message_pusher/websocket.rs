//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `RoomEvent` を JSON にエンコードして送信（push_to, broadcast）
//!
//! The socket itself is owned by the UI layer's connection task, which drains
//! the receiving half of the channel. Sending never awaits the socket, so a
//! slow client cannot stall a broadcast.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: connection id, Value: outbound channel of that connection
    clients: RwLock<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections currently able to receive events.
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

/// Encode a domain event into the JSON text frame clients receive.
pub fn encode_event(event: &RoomEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerEvent::from(event))
        .map_err(|e| MessagePushError::Encode(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        self.clients.write().await.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        self.clients.write().await.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let text = encode_event(event)?;
        let clients = self.clients.read().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.as_str().to_string()))?;
        sender
            .send(text)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.name(), client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<usize, MessagePushError> {
        if targets.is_empty() {
            return Ok(0);
        }
        let text = encode_event(event)?;
        let clients = self.clients.read().await;

        let mut delivered = 0;
        for target in targets {
            match clients.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(text.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push '{}' to '{}': {}", event.name(), target, e)
                    }
                },
                None => tracing::warn!(
                    "Client '{}' not found during broadcast, skipping",
                    target
                ),
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {}/{} clients",
            event.name(),
            delivered,
            targets.len()
        );

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    fn connected(id: &str) -> RoomEvent {
        RoomEvent::Connected { user_id: conn(id) }
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにイベントが JSON で送信される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("alice"), tx).await;

        // when (操作):
        let result = pusher.push_to(&conn("alice"), &connected("alice")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received: serde_json::Value =
            serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(
            received,
            serde_json::json!({"type": "connected", "user_id": "alice"})
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&conn("ghost"), &connected("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部のクライアントが存在しない・切断済みでも残りには届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("alice"), tx1).await;
        pusher.register_client(conn("bob"), tx2).await;
        drop(rx2);

        // when (操作):
        let targets = vec![conn("alice"), conn("bob"), conn("ghost")];
        let result = pusher.broadcast(&targets, &connected("x")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert!(rx1.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        // テスト項目: 登録解除したクライアントには送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&conn("alice")).await;
        let result = pusher.broadcast(&[conn("alice")], &connected("x")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        assert_eq!(pusher.client_count().await, 0);
    }
}
