//! In-memory repositories.
//!
//! ## ロックの粒度
//!
//! Both maps are `DashMap`s: each shard has its own lock, so mutations of
//! unrelated rooms (or connections) rarely contend. A room's membership change
//! and its emptiness check happen under the same entry lock, which is what
//! keeps an emptied room from ever being observable. No guard is held across
//! an `.await`.

mod connection_registry;
mod room_directory;

pub use connection_registry::InMemoryConnectionRegistry;
pub use room_directory::InMemoryRoomDirectory;
