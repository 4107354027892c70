//! Signaling and presence relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin venti-server
//! cargo run --bin venti-server -- --host 0.0.0.0 --port 3000 --database-url sqlite://chat.db
//! ```

use std::sync::Arc;

use clap::Parser;
use venti_server::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryRoomDirectory},
        store::connect_message_store,
    },
    ui::{AppState, Server},
};
use venti_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. MessageStore
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Repositories (in-memory membership state)
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let directory = Arc::new(InMemoryRoomDirectory::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Connect MessageStore (falls back to persistence-disabled mode)
    let store = connect_message_store(&config.database_url).await;

    // 4. Wire UseCases
    let app_state = Arc::new(AppState::new(
        registry,
        directory,
        message_pusher,
        store,
        Arc::new(SystemClock),
        config.max_message_bytes,
    ));

    // 5. Create and run the server
    let server = Server::new(app_state, config.allowed_origin);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
