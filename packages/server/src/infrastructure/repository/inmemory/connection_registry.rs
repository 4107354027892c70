//! InMemory Connection Registry 実装

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, RepositoryError, RoomId, UserName,
};

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: DashMap<ConnectionId, Connection>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unknown(connection_id: &ConnectionId) -> RepositoryError {
    RepositoryError::UnknownConnection(connection_id.as_str().to_string())
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) {
        tracing::debug!("Connection '{}' registered", connection.id);
        self.connections.insert(connection.id.clone(), connection);
    }

    async fn set_display_name(
        &self,
        connection_id: &ConnectionId,
        name: UserName,
    ) -> Result<UserName, RepositoryError> {
        let mut connection = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| unknown(connection_id))?;
        Ok(connection.set_display_name(name).clone())
    }

    async fn display_name(&self, connection_id: &ConnectionId) -> Option<UserName> {
        self.connections
            .get(connection_id)
            .and_then(|connection| connection.display_name.clone())
    }

    async fn record_join(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<(), RepositoryError> {
        let mut connection = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| unknown(connection_id))?;
        connection.rooms.insert(room_id);
        Ok(())
    }

    async fn record_leave(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<(), RepositoryError> {
        let mut connection = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| unknown(connection_id))?;
        connection.rooms.remove(room_id);
        Ok(())
    }

    async fn joined_rooms(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<HashSet<RoomId>, RepositoryError> {
        self.connections
            .get(connection_id)
            .map(|connection| connection.rooms.clone())
            .ok_or_else(|| unknown(connection_id))
    }

    async fn forget(&self, connection_id: &ConnectionId) -> Result<Connection, RepositoryError> {
        self.connections
            .remove(connection_id)
            .map(|(_, connection)| connection)
            .ok_or_else(|| unknown(connection_id))
    }

    async fn count(&self) -> usize {
        self.connections.len()
    }
}
