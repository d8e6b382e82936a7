pub mod actions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::wait_until;
#[allow(unused_imports)]
pub use mocks::{mock_connection, MockPeer};
#[allow(unused_imports)]
pub use setup::{TestClient, TestSetup, TestSetupBuilder};
