//! Domain error types.

use thiserror::Error;

/// Validation failures for client-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("user name must not be empty")]
    EmptyUserName,

    #[error("message content must not be empty")]
    EmptyMessageContent,
}

/// Failures of the in-memory registry and directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The connection was never registered or has already been forgotten.
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}

/// Failures when delivering an event to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// Failures of the chat message store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No store is connected (persistence-disabled mode).
    #[error("message store is unavailable")]
    Unavailable,

    #[error("message store rejected the write: {0}")]
    WriteRejected(String),

    #[error("message store query failed: {0}")]
    QueryFailed(String),
}
