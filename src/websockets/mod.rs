// Public API
pub use handler::{websocket_handler, ConnectionHandler, ConnectionState};
pub use socket::{InboundFrame, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod socket;
