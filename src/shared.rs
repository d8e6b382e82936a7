use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::broadcast::RoomRegistry;
use crate::config::RelayConfig;
use crate::room::generators::RoomIdGenerator;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub room_id_generator: Arc<dyn RoomIdGenerator>,
    pub heartbeat_interval: Duration,
}

impl AppState {
    pub fn new(
        registry: Arc<RoomRegistry>,
        room_id_generator: Arc<dyn RoomIdGenerator>,
        heartbeat_interval: Duration,
    ) -> Self {
        Self {
            registry,
            room_id_generator,
            heartbeat_interval,
        }
    }

    /// Builds the production state from configuration
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            Arc::new(RoomRegistry::new(config.mailbox_capacity)),
            Arc::new(crate::room::generators::UuidRoomIdGenerator::new()),
            config.heartbeat_interval,
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
