use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::mailbox::BoundedMailbox;
use super::RoomMessage;

/// Fan-out point for a single room
///
/// Every subscriber owns one `BoundedMailbox`; `publish` offers the message
/// to each mailbox registered at the instant of the call.
#[derive(Debug)]
pub struct RoomBus {
    room_id: String,
    mailbox_capacity: usize,
    created_at: DateTime<Utc>,
    next_subscriber_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, Arc<BoundedMailbox>>>,
}

impl RoomBus {
    pub fn new(room_id: impl Into<String>, mailbox_capacity: usize) -> Self {
        Self {
            room_id: room_id.into(),
            mailbox_capacity,
            created_at: Utc::now(),
            next_subscriber_id: AtomicU64::new(0),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of mailboxes currently registered
    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    /// Registers a fresh mailbox and returns the handle that owns it.
    /// Dropping the handle removes the mailbox from the room.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let mailbox = Arc::new(BoundedMailbox::new(self.mailbox_capacity));

        let subscriber_count = {
            let mut subscribers = self.lock_subscribers();
            subscribers.insert(id, Arc::clone(&mailbox));
            subscribers.len()
        };

        debug!(
            room_id = %self.room_id,
            subscriber_id = id,
            subscribers = subscriber_count,
            "Subscriber added to room"
        );

        Subscription {
            id,
            mailbox,
            bus: Arc::clone(self),
            released: false,
        }
    }

    /// Offers the message to every current subscriber without waiting.
    /// Returns the number of mailboxes it was delivered to.
    pub fn publish(&self, message: RoomMessage) -> usize {
        let subscribers = self.lock_subscribers();

        let mut evicted = 0;
        for mailbox in subscribers.values() {
            if mailbox.put(Arc::clone(&message)) {
                evicted += 1;
            }
        }

        debug!(
            room_id = %self.room_id,
            receivers = subscribers.len(),
            evicted = evicted,
            "Room message published"
        );

        subscribers.len()
    }

    /// Removes a subscriber; unknown ids are ignored
    fn unsubscribe(&self, id: u64) {
        let removed = self.lock_subscribers().remove(&id).is_some();
        if removed {
            debug!(room_id = %self.room_id, subscriber_id = id, "Subscriber removed from room");
        }
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, HashMap<u64, Arc<BoundedMailbox>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped membership in a `RoomBus`
///
/// Release happens exactly once, either through `close` or on drop, which
/// also covers task cancellation and panics in the owning task.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    mailbox: Arc<BoundedMailbox>,
    bus: Arc<RoomBus>,
    released: bool,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn room_id(&self) -> &str {
        self.bus.room_id()
    }

    /// Waits for the next message addressed to this subscriber
    pub async fn take(&self) -> RoomMessage {
        self.mailbox.take().await
    }

    pub fn try_take(&self) -> Option<RoomMessage> {
        self.mailbox.try_take()
    }

    pub fn pending(&self) -> usize {
        self.mailbox.len()
    }

    /// Leaves the room now instead of waiting for drop
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.bus.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
