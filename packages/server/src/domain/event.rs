//! Outbound room events and their fan-out policy.

use super::{
    entity::{ChatMessage, Member},
    value_object::{ConnectionId, RoomId, UserName},
};

/// Opaque WebRTC negotiation payload (SDP or ICE candidate), relayed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPayload(serde_json::Value);

impl SignalPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

/// The four call-negotiation event kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Offer(SignalPayload),
    Answer(SignalPayload),
    IceCandidate(SignalPayload),
    EndCall,
}

impl Signal {
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Offer(_) => "offer",
            Signal::Answer(_) => "answer",
            Signal::IceCandidate(_) => "ice-candidate",
            Signal::EndCall => "end-call",
        }
    }
}

/// Who receives an event relative to the connection that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    /// Only the originating connection.
    Sender,
    /// Every member of the room, the sender included.
    WholeRoom,
    /// Every member of the room except the sender.
    RoomExceptSender,
}

/// An event the server delivers to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Greeting carrying the server-assigned id of the new connection.
    Connected { user_id: ConnectionId },
    /// Membership snapshot sent to a connection that just joined.
    RoomJoined {
        room_id: RoomId,
        user_id: ConnectionId,
        members: Vec<Member>,
    },
    UserJoined {
        room_id: RoomId,
        user_id: ConnectionId,
        user_name: Option<UserName>,
    },
    UserLeft {
        room_id: RoomId,
        user_id: ConnectionId,
        user_name: Option<UserName>,
    },
    Chat(ChatMessage),
    Typing {
        room_id: RoomId,
        user_id: ConnectionId,
        user_name: Option<UserName>,
        is_typing: bool,
    },
    Signal {
        room_id: RoomId,
        user_id: ConnectionId,
        signal: Signal,
    },
}

impl RoomEvent {
    /// Fan-out scope of this event kind.
    pub fn fan_out(&self) -> FanOut {
        match self {
            RoomEvent::Connected { .. } | RoomEvent::RoomJoined { .. } => FanOut::Sender,
            // the sender's UI renders its own line from the server echo
            RoomEvent::Chat(_) => FanOut::WholeRoom,
            RoomEvent::UserJoined { .. }
            | RoomEvent::UserLeft { .. }
            | RoomEvent::Typing { .. }
            | RoomEvent::Signal { .. } => FanOut::RoomExceptSender,
        }
    }

    /// Wire name of the event, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::Connected { .. } => "connected",
            RoomEvent::RoomJoined { .. } => "room-joined",
            RoomEvent::UserJoined { .. } => "user-joined",
            RoomEvent::UserLeft { .. } => "user-left",
            RoomEvent::Chat(_) => "chat-message",
            RoomEvent::Typing { .. } => "typing",
            RoomEvent::Signal { signal, .. } => signal.kind(),
        }
    }
}
