use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for room creation
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: String,
    pub stream_path: String,
    pub publish_path: String,
}

/// Live membership snapshot of a room
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomStatsResponse {
    pub id: String,
    pub subscriber_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Fixed acknowledgment for a publish call; never confirms delivery
#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    pub success: bool,
}
