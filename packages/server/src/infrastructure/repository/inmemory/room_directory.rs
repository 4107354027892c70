//! InMemory Room Directory 実装

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{ConnectionId, RoomDirectory, RoomId, RoomSummary};

/// インメモリ Room Directory 実装
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    /// Key: room id, Value: member connection ids (never empty)
    rooms: DashMap<RoomId, HashSet<ConnectionId>>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn join(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let added = self
            .rooms
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id.clone());
        if added {
            tracing::debug!("'{}' added to room '{}'", connection_id, room_id);
        }
        added
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(mut entry) => {
                let removed = entry.get_mut().remove(connection_id);
                if entry.get().is_empty() {
                    entry.remove();
                    tracing::debug!("Room '{}' is empty and was deleted", room_id);
                }
                removed
            }
            Entry::Vacant(_) => false,
        }
    }

    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn members_except(
        &self,
        room_id: &RoomId,
        exclude_connection_id: &ConnectionId,
    ) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|id| *id != exclude_connection_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn is_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|members| members.contains(connection_id))
    }

    async fn room_exists(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|entry| {
                let mut members: Vec<ConnectionId> = entry.value().iter().cloned().collect();
                members.sort();
                RoomSummary {
                    room_id: entry.key().clone(),
                    members,
                }
            })
            .collect();
        rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomId {
        RoomId::new(name.to_string()).unwrap()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    #[tokio::test]
    async fn test_join_creates_room_lazily() {
        // テスト項目: 初回の join でルームが作成される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        assert!(!directory.room_exists(&room("demo")).await);

        // when (操作):
        let added = directory.join(&room("demo"), &conn("c1")).await;

        // then (期待する結果):
        assert!(added);
        assert!(directory.room_exists(&room("demo")).await);
        assert_eq!(directory.members(&room("demo")).await, vec![conn("c1")]);
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        // テスト項目: 同じメンバーの二重 join は何もしない
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        directory.join(&room("demo"), &conn("c1")).await;

        // when (操作):
        let added_again = directory.join(&room("demo"), &conn("c1")).await;

        // then (期待する結果):
        assert!(!added_again);
        assert_eq!(directory.members(&room("demo")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_leave_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが抜けるとルームが同じ呼び出しの中で削除される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        directory.join(&room("demo"), &conn("c1")).await;
        directory.join(&room("demo"), &conn("c2")).await;

        // when (操作):
        directory.leave(&room("demo"), &conn("c1")).await;
        let still_there = directory.room_exists(&room("demo")).await;
        let removed = directory.leave(&room("demo"), &conn("c2")).await;

        // then (期待する結果):
        assert!(still_there);
        assert!(removed);
        assert!(!directory.room_exists(&room("demo")).await);
        assert!(directory.rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unknown_room_or_member() {
        // テスト項目: 存在しないルーム・メンバーの leave は false を返し、ルームを作らない
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        directory.join(&room("demo"), &conn("c1")).await;

        // when (操作):
        let unknown_room = directory.leave(&room("nowhere"), &conn("c1")).await;
        let unknown_member = directory.leave(&room("demo"), &conn("c9")).await;

        // then (期待する結果):
        assert!(!unknown_room);
        assert!(!unknown_member);
        assert!(!directory.room_exists(&room("nowhere")).await);
        assert!(directory.room_exists(&room("demo")).await);
    }

    #[tokio::test]
    async fn test_members_except_excludes_only_given_connection() {
        // テスト項目: members_except は指定した接続のみを除外する
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        for id in ["c1", "c2", "c3"] {
            directory.join(&room("demo"), &conn(id)).await;
        }

        // when (操作):
        let targets = directory.members_except(&room("demo"), &conn("c2")).await;
        let unknown = directory.members_except(&room("nowhere"), &conn("c2")).await;

        // then (期待する結果):
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&conn("c1")));
        assert!(targets.contains(&conn("c3")));
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        // テスト項目: 別々のルームのメンバーシップは互いに影響しない
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        directory.join(&room("a"), &conn("c1")).await;
        directory.join(&room("b"), &conn("c1")).await;
        directory.join(&room("b"), &conn("c2")).await;

        // when (操作):
        directory.leave(&room("a"), &conn("c1")).await;
        let rooms = directory.rooms().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_id, room("b"));
        assert_eq!(rooms[0].members, vec![conn("c1"), conn("c2")]);
        assert!(directory.is_member(&room("b"), &conn("c1")).await);
    }
}
