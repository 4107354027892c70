//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{get_room_detail, get_room_history, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// `allowed_origin` restricts CORS to one origin; `*` allows any.
pub fn build_router(state: Arc<AppState>, allowed_origin: &str) -> Router {
    let cors = CorsLayer::new().allow_methods([Method::GET]).allow_headers(Any);
    let cors = if allowed_origin.trim() == "*" {
        cors.allow_origin(Any)
    } else {
        match HeaderValue::from_str(allowed_origin.trim()) {
            Ok(origin) => cors.allow_origin(origin),
            Err(e) => {
                tracing::warn!(
                    "Ignoring invalid allowed origin '{}': {}",
                    allowed_origin,
                    e
                );
                cors
            }
        }
    };

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/messages/{room_id}", get(get_room_history))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Signaling and presence relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, "http://localhost:5173".to_string());
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    allowed_origin: String,
}

impl Server {
    pub fn new(state: Arc<AppState>, allowed_origin: String) -> Self {
        Self {
            state,
            allowed_origin,
        }
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = build_router(self.state, &self.allowed_origin);
        let local_addr = listener.local_addr()?;

        tracing::info!("Signaling server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
