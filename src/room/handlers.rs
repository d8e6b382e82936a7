use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::RoomService,
    types::{PublishResponse, RoomResponse, RoomStatsResponse},
};
use crate::shared::{AppError, AppState};

fn room_service(state: &AppState) -> RoomService {
    RoomService::new(
        Arc::clone(&state.registry),
        Arc::clone(&state.room_id_generator),
    )
}

/// HTTP handler for creating a new room
///
/// POST /room
/// Returns the generated room ID and the paths to use it
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(State(state): State<AppState>) -> Json<RoomResponse> {
    info!("Creating new room");

    let room = room_service(&state).create_room().await;

    info!(room_id = %room.id, "Room created successfully");

    Json(room)
}

/// HTTP handler for inspecting a room
///
/// GET /room/{room_id}
/// Returns the current subscriber count; 404 if the room was never used
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RoomStatsResponse>, AppError> {
    let stats = room_service(&state).room_stats(&room_id)?;
    Ok(Json(stats))
}

/// HTTP handler for broadcasting a message to a room
///
/// POST /ajax/{room_id}/send
/// The body is relayed as-is; the response is always {"success": true}
#[instrument(name = "publish_message", skip(state, body))]
pub async fn publish_message(
    Path(room_id): Path<String>,
    State(state): State<AppState>,
    body: String,
) -> Json<PublishResponse> {
    info!(room_id = %room_id, body_len = body.len(), "Publishing message");

    Json(room_service(&state).publish(&room_id, body))
}
