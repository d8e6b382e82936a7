// Public API - what other modules can use
pub use handlers::{create_room, get_room, publish_message};
pub use service::RoomService;

// Internal modules
pub mod generators;
mod handlers;
mod service;
pub mod types;
