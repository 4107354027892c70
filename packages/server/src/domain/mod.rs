//! Domain layer: value objects, entities, events and the ports the other layers implement.
//!
//! Nothing in here knows about WebSocket frames, HTTP or SQL. The usecase layer
//! depends on the traits declared here and the infrastructure layer provides them.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod store;
pub mod value_object;

pub use entity::{ChatMessage, Connection, Member, RoomSummary};
pub use error::{MessagePushError, RepositoryError, StoreError, ValueObjectError};
pub use event::{FanOut, RoomEvent, Signal, SignalPayload};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ConnectionRegistry, RoomDirectory};
pub use store::MessageStore;
pub use value_object::{
    ConnectionId, ConnectionIdFactory, MessageContent, MessageId, RoomId, Timestamp, UserName,
};

#[cfg(test)]
pub use store::MockMessageStore;
