//! Utilities shared between the Venti signaling server binary and its library.

pub mod logger;
pub mod time;
