use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::broadcast::{RoomRegistry, Subscription};
use crate::shared::AppState;

use super::socket::{InboundFrame, SocketError, SocketWrapper};

/// Lifecycle of a single room stream connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Subscribed,
    Closed,
}

/// Binds one socket to one room subscription for the socket's lifetime
///
/// Messages flow one way, from the room to the client. Anything the client
/// sends is read only so that a close is noticed promptly.
pub struct ConnectionHandler {
    room_id: String,
    socket: Box<dyn SocketWrapper>,
    registry: Arc<RoomRegistry>,
    heartbeat_interval: Duration,
    state: ConnectionState,
}

impl ConnectionHandler {
    pub fn new(
        room_id: String,
        socket: Box<dyn SocketWrapper>,
        registry: Arc<RoomRegistry>,
        heartbeat_interval: Duration,
    ) -> Self {
        Self {
            room_id,
            socket,
            registry,
            heartbeat_interval,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Run the connection until the peer goes away or a send fails.
    ///
    /// The subscription lives on this future's stack, so it is released
    /// when the connection closes, errors, or the future is dropped.
    pub async fn run(&mut self) -> Result<(), SocketError> {
        if self.state == ConnectionState::Closed {
            return Err(SocketError::ConnectionClosed);
        }

        let subscription = self.registry.get(&self.room_id).subscribe();
        self.transition(ConnectionState::Subscribed);

        let result = self.forward(&subscription).await;

        subscription.close();
        self.transition(ConnectionState::Closed);

        // Best effort; the peer may already be gone
        let _ = self.socket.close().await;
        result
    }

    async fn forward(&mut self, subscription: &Subscription) -> Result<(), SocketError> {
        let mut heartbeat = interval_at(
            Instant::now() + self.heartbeat_interval,
            self.heartbeat_interval,
        );
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // A peer that answers nothing for two heartbeats is treated as gone
        let idle_timeout = self.heartbeat_interval * 2;
        let mut last_seen = Instant::now();

        loop {
            tokio::select! {
                // Outbound: room -> client
                message = subscription.take() => {
                    self.socket.send_message(message.to_string()).await?
                }

                // Inbound: only watched for liveness and disconnects
                inbound = self.socket.receive_message() => {
                    match inbound {
                        Ok(Some(frame)) => {
                            last_seen = Instant::now();
                            if let InboundFrame::Message(message) = frame {
                                debug!(
                                    room_id = %self.room_id,
                                    message_len = message.len(),
                                    "Ignoring inbound client message"
                                );
                            }
                        }
                        Ok(None) => return Ok(()), // Client disconnected
                        Err(e) => return Err(e),
                    }
                }

                _ = heartbeat.tick() => {
                    let silent_for = last_seen.elapsed();
                    if silent_for > idle_timeout {
                        warn!(
                            room_id = %self.room_id,
                            silent_ms = silent_for.as_millis() as u64,
                            "Peer stopped answering heartbeats"
                        );
                        return Err(SocketError::PeerTimeout(silent_for));
                    }
                    self.socket.send_ping().await?
                }
            }
        }
    }

    fn transition(&mut self, next: ConnectionState) {
        debug!(
            room_id = %self.room_id,
            from = ?self.state,
            to = ?next,
            "Connection state change"
        );
        self.state = next;
    }
}

/// WebSocket endpoint streaming a room's messages to the client
/// GET /ws/{room_id}
#[instrument(name = "websocket_handler", skip(state, ws))]
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    info!(room_id = %room_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, room_id, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    room_id: String,
    state: AppState,
) {
    info!(room_id = %room_id, "WebSocket connection established");

    let mut handler = ConnectionHandler::new(
        room_id.clone(),
        Box::new(socket),
        Arc::clone(&state.registry),
        state.heartbeat_interval,
    );

    match handler.run().await {
        Ok(()) => {
            info!(room_id = %room_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(room_id = %room_id, error = %e, "WebSocket connection error");
        }
    }
}
