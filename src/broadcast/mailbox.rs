use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use super::RoomMessage;

/// Default number of pending messages a subscriber may hold
pub const DEFAULT_MAILBOX_CAPACITY: usize = 5;

/// Fixed-capacity FIFO buffer for a single subscriber
///
/// Publishers never wait on a mailbox: when it is full the oldest pending
/// message is evicted to make room for the new one.
#[derive(Debug)]
pub struct BoundedMailbox {
    capacity: usize,
    queue: Mutex<VecDeque<RoomMessage>>,
    available: Notify,
}

impl BoundedMailbox {
    /// Creates an empty mailbox; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock_queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_queue().is_empty()
    }

    /// Enqueues a message, evicting the oldest pending one if full.
    /// Returns true when a message was dropped to make room.
    pub fn put(&self, message: RoomMessage) -> bool {
        let evicted = {
            let mut queue = self.lock_queue();
            let evicted = if queue.len() >= self.capacity {
                queue.pop_front().is_some()
            } else {
                false
            };
            queue.push_back(message);
            evicted
        };

        self.available.notify_one();
        evicted
    }

    /// Waits until a message is available and returns it in FIFO order.
    ///
    /// Cancel safe: a dropped `take` never consumes a message.
    pub async fn take(&self) -> RoomMessage {
        loop {
            if let Some(message) = self.try_take() {
                return message;
            }
            self.available.notified().await;
        }
    }

    /// Pops the oldest pending message without waiting
    pub fn try_take(&self) -> Option<RoomMessage> {
        self.lock_queue().pop_front()
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<RoomMessage>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BoundedMailbox {
    fn default() -> Self {
        Self::new(DEFAULT_MAILBOX_CAPACITY)
    }
}
