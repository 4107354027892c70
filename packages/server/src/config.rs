//! Server configuration.

use clap::Parser;

/// Command line / environment configuration of the server
#[derive(Parser, Debug, Clone)]
#[command(name = "venti-server")]
#[command(about = "Room-based chat and WebRTC signaling relay", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Message store connection string (`sqlite:...`, `memory` or `disabled`)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    /// Origin allowed by CORS (`*` allows any)
    #[arg(long, env = "CLIENT_ORIGIN", default_value = "http://localhost:5173")]
    pub allowed_origin: String,

    /// Largest inbound WebSocket message, in bytes
    #[arg(long, env = "MAX_MESSAGE_BYTES", default_value_t = 65536)]
    pub max_message_bytes: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}
