//! Fan-out target resolution shared by the usecases.

use crate::domain::{
    ConnectionId, FanOut, MessagePusher, RoomDirectory, RoomEvent, RoomId, UserName,
};

/// Resolve who receives an event that `sender` emitted in `room_id`.
///
/// A sender that is not a member of the room reaches nobody, which also
/// covers rooms that do not exist.
pub(crate) async fn resolve_targets(
    directory: &dyn RoomDirectory,
    room_id: &RoomId,
    sender: &ConnectionId,
    scope: FanOut,
) -> Vec<ConnectionId> {
    if !directory.is_member(room_id, sender).await {
        tracing::debug!(
            "'{}' is not a member of room '{}', nothing to deliver",
            sender,
            room_id
        );
        return Vec::new();
    }
    match scope {
        FanOut::Sender => vec![sender.clone()],
        FanOut::WholeRoom => directory.members(room_id).await,
        FanOut::RoomExceptSender => directory.members_except(room_id, sender).await,
    }
}

/// Announce `user-left` to the rest of the room, then remove the membership.
///
/// Returns the connections that were notified. The room is deleted by the
/// directory if this was its last member.
pub(crate) async fn depart_room(
    directory: &dyn RoomDirectory,
    pusher: &dyn MessagePusher,
    room_id: &RoomId,
    connection_id: &ConnectionId,
    user_name: Option<UserName>,
) -> Vec<ConnectionId> {
    let targets = directory.members_except(room_id, connection_id).await;
    let event = RoomEvent::UserLeft {
        room_id: room_id.clone(),
        user_id: connection_id.clone(),
        user_name,
    };
    if let Err(e) = pusher.broadcast(&targets, &event).await {
        tracing::warn!("Failed to broadcast user-left in room '{}': {}", room_id, e);
    }
    directory.leave(room_id, connection_id).await;
    tracing::info!("'{}' left room '{}'", connection_id, room_id);
    targets
}
