//! Conversion logic between DTOs and domain entities.

use venti_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, Member, RoomEvent, RoomSummary, Signal};
use crate::infrastructure::dto::{
    http::{HistoryMessageDto, RoomDetailDto, RoomSummaryDto},
    websocket::{ChatMessageDto, MemberInfo, ServerEvent},
};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<&ChatMessage> for ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            room_id: model.room_id.as_str().to_string(),
            sender_id: model.sender_id.as_str().to_string(),
            recipient_id: model.recipient_id.clone(),
            content: model.content.as_str().to_string(),
            delivered_at: model.delivered_at.value(),
            read: model.read,
        }
    }
}

impl From<&Member> for MemberInfo {
    fn from(model: &Member) -> Self {
        Self {
            user_id: model.user_id.as_str().to_string(),
            user_name: model.user_name.as_ref().map(|n| n.as_str().to_string()),
        }
    }
}

impl From<&RoomEvent> for ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Connected { user_id } => ServerEvent::Connected {
                user_id: user_id.as_str().to_string(),
            },
            RoomEvent::RoomJoined {
                room_id,
                user_id,
                members,
            } => ServerEvent::RoomJoined {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                members: members.iter().map(MemberInfo::from).collect(),
            },
            RoomEvent::UserJoined {
                room_id,
                user_id,
                user_name,
            } => ServerEvent::UserJoined {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                user_name: user_name.as_ref().map(|n| n.as_str().to_string()),
            },
            RoomEvent::UserLeft {
                room_id,
                user_id,
                user_name,
            } => ServerEvent::UserLeft {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                user_name: user_name.as_ref().map(|n| n.as_str().to_string()),
            },
            RoomEvent::Chat(message) => ServerEvent::ChatMessage(message.into()),
            RoomEvent::Typing {
                room_id,
                user_id,
                user_name,
                is_typing,
            } => ServerEvent::Typing {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                user_name: user_name.as_ref().map(|n| n.as_str().to_string()),
                is_typing: *is_typing,
            },
            RoomEvent::Signal {
                room_id,
                user_id,
                signal,
            } => {
                let room_id = room_id.as_str().to_string();
                let user_id = user_id.as_str().to_string();
                match signal {
                    Signal::Offer(sdp) => ServerEvent::Offer {
                        room_id,
                        user_id,
                        sdp: sdp.as_value().clone(),
                    },
                    Signal::Answer(sdp) => ServerEvent::Answer {
                        room_id,
                        user_id,
                        sdp: sdp.as_value().clone(),
                    },
                    Signal::IceCandidate(candidate) => ServerEvent::IceCandidate {
                        room_id,
                        user_id,
                        candidate: candidate.as_value().clone(),
                    },
                    Signal::EndCall => ServerEvent::EndCall { room_id, user_id },
                }
            }
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<ChatMessage> for HistoryMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            room_id: model.room_id.into_string(),
            sender_id: model.sender_id.into_string(),
            recipient_id: model.recipient_id,
            content: model.content.into_string(),
            delivered_at: model.delivered_at.value(),
            delivered_at_rfc3339: timestamp_to_rfc3339(model.delivered_at.value()),
            read: model.read,
        }
    }
}

impl From<&RoomSummary> for RoomSummaryDto {
    fn from(model: &RoomSummary) -> Self {
        Self {
            id: model.room_id.as_str().to_string(),
            member_count: model.members.len(),
        }
    }
}

impl From<RoomSummary> for RoomDetailDto {
    fn from(model: RoomSummary) -> Self {
        Self {
            id: model.room_id.into_string(),
            members: model
                .members
                .into_iter()
                .map(|id| id.into_string())
                .collect(),
        }
    }
}
