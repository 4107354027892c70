//! UI layer: axum router, WebSocket and HTTP handlers.

mod event_router;
mod handler;
mod server;
mod signal;
pub mod state;

pub use event_router::{EventRouter, RouteError};
pub use server::{Server, build_router};
pub use state::AppState;
