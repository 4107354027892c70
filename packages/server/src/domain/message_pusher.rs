//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信を抽象化します。
//! WebSocket の sender 管理とエンコードは Infrastructure 層の実装が担います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent};

/// Outbound channel of one connection; the socket task drains it.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    async fn unregister_client(&self, client_id: &ConnectionId);

    /// Deliver an event to a single connection.
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Deliver an event to every target. Individual send failures are tolerated;
    /// returns how many targets accepted the event.
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<usize, MessagePushError>;
}
