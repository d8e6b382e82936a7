use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use super::bus::RoomBus;
use super::mailbox::DEFAULT_MAILBOX_CAPACITY;

/// Process-wide map of room id -> bus
///
/// Created once at startup and shared through `AppState`. Rooms are added
/// lazily on first reference and live until the process exits.
#[derive(Debug)]
pub struct RoomRegistry {
    mailbox_capacity: usize,
    rooms: RwLock<HashMap<String, Arc<RoomBus>>>,
}

impl RoomRegistry {
    pub fn new(mailbox_capacity: usize) -> Self {
        Self {
            mailbox_capacity,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the bus for a room, creating it on first access
    pub fn get(&self, room_id: &str) -> Arc<RoomBus> {
        if let Some(bus) = self.peek(room_id) {
            return bus;
        }

        // Another caller may have inserted between the read and write locks
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let bus = rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Creating room bus");
            Arc::new(RoomBus::new(room_id, self.mailbox_capacity))
        });
        Arc::clone(bus)
    }

    /// Looks up an existing room without creating it
    pub fn peek(&self, room_id: &str) -> Option<Arc<RoomBus>> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        let bus = rooms.get(room_id).cloned();
        if bus.is_none() {
            debug!(room_id = %room_id, "Room not found in registry");
        }
        bus
    }

    pub fn room_count(&self) -> usize {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn mailbox_capacity(&self) -> usize {
        self.mailbox_capacity
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAILBOX_CAPACITY)
    }
}
