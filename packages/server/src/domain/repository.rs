//! Repository trait 定義
//!
//! ルームのメンバーシップと接続の状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! Both structures are owned values injected at startup; nothing here is a
//! process-wide global, so independent instances can coexist in tests.

use std::collections::HashSet;

use async_trait::async_trait;

use super::{
    Connection, ConnectionId, RepositoryError, RoomId, RoomSummary, UserName,
};

/// Room Directory: room id → membership set.
///
/// Rooms are created lazily on the first join and removed in the same call
/// that takes out their last member.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Add a member. Returns `false` when it was already present (no-op).
    async fn join(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool;

    /// Remove a member, deleting the room if it becomes empty.
    /// Returns `false` when the connection was not a member.
    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool;

    /// Snapshot of the members of a room; empty for unknown rooms.
    async fn members(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// Members of a room except one connection; empty for unknown rooms.
    async fn members_except(
        &self,
        room_id: &RoomId,
        exclude_connection_id: &ConnectionId,
    ) -> Vec<ConnectionId>;

    async fn is_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool;

    async fn room_exists(&self, room_id: &RoomId) -> bool;

    /// Every enumerable room, sorted by id.
    async fn rooms(&self) -> Vec<RoomSummary>;
}

/// Connection Registry: connection id → identity and joined rooms.
///
/// Operations on an id that was never registered (or already forgotten)
/// return [`RepositoryError::UnknownConnection`].
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn register(&self, connection: Connection);

    /// Set the display name if none is set yet; returns the effective name.
    async fn set_display_name(
        &self,
        connection_id: &ConnectionId,
        name: UserName,
    ) -> Result<UserName, RepositoryError>;

    async fn display_name(&self, connection_id: &ConnectionId) -> Option<UserName>;

    async fn record_join(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<(), RepositoryError>;

    async fn record_leave(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<(), RepositoryError>;

    async fn joined_rooms(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<HashSet<RoomId>, RepositoryError>;

    /// Remove the connection and hand back its final state, rooms included.
    async fn forget(&self, connection_id: &ConnectionId) -> Result<Connection, RepositoryError>;

    async fn count(&self) -> usize;
}
