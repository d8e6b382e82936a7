use async_trait::async_trait;
use uuid::Uuid;

/// Trait for minting room identifiers
#[async_trait]
pub trait RoomIdGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Random UUID v4 room ids, unguessable enough to act as a room handle
pub struct UuidRoomIdGenerator;

impl UuidRoomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidRoomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomIdGenerator for UuidRoomIdGenerator {
    async fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
