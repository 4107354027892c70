//! WebSocket event DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event in kebab-case.

use serde::{Deserialize, Serialize};

/// Event sent by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom {
        room_id: String,
        #[serde(default)]
        user_name: Option<String>,
    },
    LeaveRoom {
        room_id: String,
    },
    ChatMessage {
        room_id: String,
        sender_id: String,
        #[serde(default)]
        recipient_id: Option<String>,
        content: String,
    },
    Typing {
        room_id: String,
        #[serde(default)]
        user_name: Option<String>,
        is_typing: bool,
    },
    Offer {
        room_id: String,
        sdp: serde_json::Value,
    },
    Answer {
        room_id: String,
        sdp: serde_json::Value,
    },
    IceCandidate {
        room_id: String,
        candidate: serde_json::Value,
    },
    EndCall {
        room_id: String,
    },
}

/// Member entry of the `room-joined` snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: String,
    pub user_name: Option<String>,
}

/// Chat message as broadcast to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch), assigned by the server
    pub delivered_at: i64,
    pub read: bool,
}

/// Event sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected {
        user_id: String,
    },
    RoomJoined {
        room_id: String,
        user_id: String,
        members: Vec<MemberInfo>,
    },
    UserJoined {
        room_id: String,
        user_id: String,
        user_name: Option<String>,
    },
    UserLeft {
        room_id: String,
        user_id: String,
        user_name: Option<String>,
    },
    ChatMessage(ChatMessageDto),
    Typing {
        room_id: String,
        user_id: String,
        user_name: Option<String>,
        is_typing: bool,
    },
    Offer {
        room_id: String,
        user_id: String,
        sdp: serde_json::Value,
    },
    Answer {
        room_id: String,
        user_id: String,
        sdp: serde_json::Value,
    },
    IceCandidate {
        room_id: String,
        user_id: String,
        candidate: serde_json::Value,
    },
    EndCall {
        room_id: String,
        user_id: String,
    },
}
