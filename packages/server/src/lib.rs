//! Real-time signaling and presence relay.
//!
//! Connections join named rooms over WebSocket; chat, typing indicators and
//! WebRTC negotiation events are fanned out to the room, and chat messages
//! are persisted on a best-effort basis for the history endpoint.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
