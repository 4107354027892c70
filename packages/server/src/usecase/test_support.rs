//! Shared fixtures for usecase tests.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionId, ConnectionRegistry, MessagePusher, RoomId, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryRoomDirectory},
    },
};

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string())
}

pub fn room(name: &str) -> RoomId {
    RoomId::new(name.to_string()).unwrap()
}

/// Registry, directory and pusher wired together like the server does.
pub struct Fixture {
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub directory: Arc<InMemoryRoomDirectory>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryConnectionRegistry::new()),
            directory: Arc::new(InMemoryRoomDirectory::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
        }
    }

    /// Register a connection and return the receiving end of its outbound channel.
    pub async fn connect(&self, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry
            .register(Connection::new(conn(id), Timestamp::new(1000)))
            .await;
        self.pusher.register_client(conn(id), tx).await;
        rx
    }
}

/// Everything currently queued on a receiver, decoded as JSON.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(text) = rx.try_recv() {
        events.push(serde_json::from_str(&text).unwrap());
    }
    events
}

/// The `type` fields of everything currently queued on a receiver.
pub fn drain_types(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    drain(rx)
        .into_iter()
        .map(|event| event["type"].as_str().unwrap_or_default().to_string())
        .collect()
}
