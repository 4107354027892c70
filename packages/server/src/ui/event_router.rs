//! Event Router: decodes inbound frames and dispatches them to the usecases.
//!
//! Frames of one connection are routed sequentially, in the order the
//! transport delivers them. A frame that cannot be decoded or fails
//! validation is dropped; the connection stays open.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{
        ConnectionId, MessageContent, PusherChannel, RoomId, Signal, SignalPayload, UserName,
        ValueObjectError,
    },
    infrastructure::dto::websocket::ClientEvent,
    usecase::{
        ConnectParticipantUseCase, DisconnectError, DisconnectParticipantUseCase, JoinRoomError,
        JoinRoomUseCase, LeaveRoomError, LeaveRoomUseCase, NewChatMessage, RelaySignalUseCase,
        RelayTypingUseCase, SendChatMessageUseCase,
    },
};

/// Why an inbound frame was dropped.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid field: {0}")]
    Invalid(#[from] ValueObjectError),
    #[error(transparent)]
    Join(#[from] JoinRoomError),
    #[error(transparent)]
    Leave(#[from] LeaveRoomError),
}

/// Routes client events to the usecases.
pub struct EventRouter {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    relay_typing_usecase: Arc<RelayTypingUseCase>,
    relay_signal_usecase: Arc<RelaySignalUseCase>,
}

impl EventRouter {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_chat_message_usecase: Arc<SendChatMessageUseCase>,
        relay_typing_usecase: Arc<RelayTypingUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            join_room_usecase,
            leave_room_usecase,
            send_chat_message_usecase,
            relay_typing_usecase,
            relay_signal_usecase,
        }
    }

    /// Accept a new connection whose outbound frames go to `sender`.
    pub async fn connect(&self, sender: PusherChannel) -> ConnectionId {
        self.connect_participant_usecase.execute(sender).await
    }

    /// Decode one text frame and handle it.
    pub async fn route_text(&self, connection_id: &ConnectionId, text: &str) -> Result<(), RouteError> {
        let event: ClientEvent = serde_json::from_str(text)?;
        self.dispatch(connection_id, event).await
    }

    /// Handle one decoded client event.
    pub async fn dispatch(
        &self,
        connection_id: &ConnectionId,
        event: ClientEvent,
    ) -> Result<(), RouteError> {
        match event {
            ClientEvent::JoinRoom { room_id, user_name } => {
                let room_id = RoomId::try_from(room_id)?;
                let user_name = optional_user_name(user_name);
                self.join_room_usecase
                    .execute(connection_id, &room_id, user_name)
                    .await?;
            }
            ClientEvent::LeaveRoom { room_id } => {
                let room_id = RoomId::try_from(room_id)?;
                self.leave_room_usecase
                    .execute(connection_id, &room_id)
                    .await?;
            }
            ClientEvent::ChatMessage {
                room_id,
                sender_id,
                recipient_id,
                content,
            } => {
                let input = NewChatMessage {
                    room_id: RoomId::try_from(room_id)?,
                    sender_id: UserName::try_from(sender_id)?,
                    recipient_id: recipient_id.unwrap_or_default(),
                    content: MessageContent::try_from(content)?,
                };
                self.send_chat_message_usecase
                    .execute(connection_id, input)
                    .await;
            }
            ClientEvent::Typing {
                room_id,
                user_name,
                is_typing,
            } => {
                let room_id = RoomId::try_from(room_id)?;
                let user_name = optional_user_name(user_name);
                self.relay_typing_usecase
                    .execute(connection_id, &room_id, user_name, is_typing)
                    .await;
            }
            ClientEvent::Offer { room_id, sdp } => {
                self.relay(connection_id, room_id, Signal::Offer(SignalPayload::new(sdp)))
                    .await?;
            }
            ClientEvent::Answer { room_id, sdp } => {
                self.relay(connection_id, room_id, Signal::Answer(SignalPayload::new(sdp)))
                    .await?;
            }
            ClientEvent::IceCandidate { room_id, candidate } => {
                let signal = Signal::IceCandidate(SignalPayload::new(candidate));
                self.relay(connection_id, room_id, signal).await?;
            }
            ClientEvent::EndCall { room_id } => {
                self.relay(connection_id, room_id, Signal::EndCall).await?;
            }
        }
        Ok(())
    }

    /// Clean up after the transport closed.
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Result<(), DisconnectError> {
        let departures = self
            .disconnect_participant_usecase
            .execute(connection_id)
            .await?;
        tracing::debug!(
            "'{}' left {} room(s) on disconnect",
            connection_id,
            departures.len()
        );
        Ok(())
    }

    async fn relay(
        &self,
        connection_id: &ConnectionId,
        room_id: String,
        signal: Signal,
    ) -> Result<(), RouteError> {
        let room_id = RoomId::try_from(room_id)?;
        self.relay_signal_usecase
            .execute(connection_id, &room_id, signal)
            .await;
        Ok(())
    }
}

/// A blank display name counts as no name; it never fails the event.
fn optional_user_name(user_name: Option<String>) -> Option<UserName> {
    user_name.and_then(|name| UserName::try_from(name).ok())
}
