//! Domain entities.

use std::collections::HashSet;

use super::value_object::{
    ConnectionId, MessageContent, MessageId, RoomId, Timestamp, UserName,
};

/// One live transport session as seen by the Connection Registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Client-supplied display name. The first value set sticks.
    pub display_name: Option<UserName>,
    /// Rooms this connection has joined and not yet left.
    pub rooms: HashSet<RoomId>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            rooms: HashSet::new(),
            connected_at,
        }
    }

    /// Set the display name unless one is already present; returns the effective name.
    pub fn set_display_name(&mut self, name: UserName) -> &UserName {
        self.display_name.get_or_insert(name)
    }
}

/// One chat line. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    /// Client-supplied and unauthenticated.
    pub sender_id: UserName,
    /// Carried through but never enforced.
    pub recipient_id: String,
    pub content: MessageContent,
    /// Assigned by the server at receipt time.
    pub delivered_at: Timestamp,
    pub read: bool,
}

impl ChatMessage {
    /// Build a new message with a fresh id and the read flag cleared.
    pub fn new(
        room_id: RoomId,
        sender_id: UserName,
        recipient_id: String,
        content: MessageContent,
        delivered_at: Timestamp,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            room_id,
            sender_id,
            recipient_id,
            content,
            delivered_at,
            read: false,
        }
    }
}

/// A room member with its display name, used for the join snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: ConnectionId,
    pub user_name: Option<UserName>,
}

/// Snapshot of one enumerable room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub members: Vec<ConnectionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_first_value_wins() {
        // テスト項目: 表示名は最初に設定された値が維持される
        // given (前提条件):
        let mut connection = Connection::new(
            ConnectionId::new("conn-1".to_string()),
            Timestamp::new(1000),
        );

        // when (操作):
        connection.set_display_name(UserName::new("alice".to_string()).unwrap());
        let effective = connection
            .set_display_name(UserName::new("mallory".to_string()).unwrap())
            .clone();

        // then (期待する結果):
        assert_eq!(effective.as_str(), "alice");
        assert_eq!(connection.display_name.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_new_chat_message_is_unread_with_unique_id() {
        // テスト項目: 新しいメッセージは未読で、ID が毎回払い出される
        // given (前提条件):
        let build = || {
            ChatMessage::new(
                RoomId::new("demo".to_string()).unwrap(),
                UserName::new("alice".to_string()).unwrap(),
                String::new(),
                MessageContent::new("hi".to_string()).unwrap(),
                Timestamp::new(1000),
            )
        };

        // when (操作):
        let first = build();
        let second = build();

        // then (期待する結果):
        assert!(!first.read);
        assert_ne!(first.id, second.id);
    }
}
