// In-memory publish/subscribe core
//
// RoomRegistry -> RoomBus -> BoundedMailbox, one mailbox per connected
// subscriber. Nothing here knows about sockets or HTTP.

use std::sync::Arc;

/// Opaque message body shared between all mailboxes of a room
pub type RoomMessage = Arc<str>;

// Public API - what other modules can use
pub use bus::{RoomBus, Subscription};
pub use mailbox::{BoundedMailbox, DEFAULT_MAILBOX_CAPACITY};
pub use registry::RoomRegistry;

// Internal modules
mod bus;
mod mailbox;
mod registry;
