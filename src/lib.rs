// Library crate for the hangout chat relay
// This file exposes the public API for the binary and integration tests

pub mod broadcast;
pub mod config;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use broadcast::{BoundedMailbox, RoomBus, RoomRegistry, Subscription};
pub use config::RelayConfig;
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionHandler, ConnectionState, InboundFrame, SocketError, SocketWrapper,
};

/// Builds the full HTTP router for the relay
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/room", post(room::create_room))
        .route("/room/:room_id", get(room::get_room))
        .route("/ajax/:room_id/send", post(room::publish_message))
        .route("/ws/:room_id", get(websockets::websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
