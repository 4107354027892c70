//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Persisted chat message returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessageDto {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch)
    pub delivered_at: i64,
    /// RFC 3339 rendering of `delivered_at`
    pub delivered_at_rfc3339: String,
    pub read: bool,
}

/// Room summary for the room list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
}

/// Room detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<String>,
}

/// Generic error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// `"enabled"` or `"disabled"`
    pub persistence: String,
}
