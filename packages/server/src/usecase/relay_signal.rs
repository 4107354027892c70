//! UseCase: 通話シグナリング（offer / answer / ice-candidate / end-call）の中継
//!
//! The server never inspects SDP or ICE payloads. Every signal goes to every
//! other member of the room, so rooms with more than two members get a full
//! broadcast rather than a peer-to-peer exchange.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomDirectory, RoomEvent, RoomId, Signal};

use super::fan_out::resolve_targets;

/// シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    directory: Arc<dyn RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(directory: Arc<dyn RoomDirectory>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            directory,
            message_pusher,
        }
    }

    /// Relay one signal and return the connections it was sent to.
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        signal: Signal,
    ) -> Vec<ConnectionId> {
        let kind = signal.kind();
        let event = RoomEvent::Signal {
            room_id: room_id.clone(),
            user_id: sender.clone(),
            signal,
        };

        let targets =
            resolve_targets(self.directory.as_ref(), room_id, sender, event.fan_out()).await;
        if targets.is_empty() {
            return targets;
        }
        if targets.len() > 1 {
            tracing::debug!(
                "Relaying {} from '{}' to {} peers in room '{}'",
                kind,
                sender,
                targets.len(),
                room_id
            );
        }
        if let Err(e) = self.message_pusher.broadcast(&targets, &event).await {
            tracing::warn!("Failed to relay {} in room '{}': {}", kind, room_id, e);
        }
        targets
    }
}
