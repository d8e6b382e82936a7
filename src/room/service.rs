use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    generators::RoomIdGenerator,
    types::{PublishResponse, RoomResponse, RoomStatsResponse},
};
use crate::broadcast::{RoomMessage, RoomRegistry};
use crate::shared::AppError;

/// Service for room-level operations that sit on top of the broadcast core
pub struct RoomService {
    registry: Arc<RoomRegistry>,
    id_generator: Arc<dyn RoomIdGenerator>,
}

impl RoomService {
    pub fn new(registry: Arc<RoomRegistry>, id_generator: Arc<dyn RoomIdGenerator>) -> Self {
        Self {
            registry,
            id_generator,
        }
    }

    /// Broadcasts an opaque payload to everyone currently in the room.
    ///
    /// Fire-and-forget: the acknowledgment is the same whether zero or many
    /// subscribers received it.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn publish(&self, room_id: &str, payload: String) -> PublishResponse {
        let message: RoomMessage = payload.into();
        let receivers = self.registry.get(room_id).publish(message);

        debug!(room_id = %room_id, receivers = receivers, "Publish issued");

        PublishResponse { success: true }
    }

    /// Mints a fresh room id; the room itself appears lazily on first use
    #[instrument(skip(self))]
    pub async fn create_room(&self) -> RoomResponse {
        let id = self.id_generator.generate().await;
        debug!(room_id = %id, "Generated room ID");

        RoomResponse {
            stream_path: format!("/ws/{id}"),
            publish_path: format!("/ajax/{id}/send"),
            id,
        }
    }

    /// Reports membership for a room that already exists
    #[instrument(skip(self))]
    pub fn room_stats(&self, room_id: &str) -> Result<RoomStatsResponse, AppError> {
        let bus = self
            .registry
            .peek(room_id)
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        let stats = RoomStatsResponse {
            id: bus.room_id().to_string(),
            subscriber_count: bus.subscriber_count(),
            created_at: bus.created_at(),
        };

        info!(
            room_id = %stats.id,
            subscriber_count = stats.subscriber_count,
            "Room stats retrieved"
        );

        Ok(stats)
    }
}
