//! UseCase: 入力中インジケーターの中継

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, RoomDirectory, RoomEvent, RoomId, UserName,
};

use super::fan_out::resolve_targets;

/// 入力中インジケーター中継のユースケース
///
/// Typing state is never stored; every event is forwarded as-is to the rest
/// of the room.
pub struct RelayTypingUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayTypingUseCase {
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

    /// Forward a typing change and return the connections it was sent to.
    ///
    /// The display name registered at join wins; the name carried by the
    /// event is used only when none was registered.
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        user_name: Option<UserName>,
        is_typing: bool,
    ) -> Vec<ConnectionId> {
        let user_name = self.registry.display_name(sender).await.or(user_name);
        let event = RoomEvent::Typing {
            room_id: room_id.clone(),
            user_id: sender.clone(),
            user_name,
            is_typing,
        };

        let targets =
            resolve_targets(self.directory.as_ref(), room_id, sender, event.fan_out()).await;
        if targets.is_empty() {
            return targets;
        }
        if let Err(e) = self.message_pusher.broadcast(&targets, &event).await {
            tracing::warn!("Failed to relay typing in room '{}': {}", room_id, e);
        }
        targets
    }
}
