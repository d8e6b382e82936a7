use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use hangout::{
    broadcast::RoomRegistry,
    room::{generators::UuidRoomIdGenerator, RoomService},
    ConnectionHandler, SocketError,
};

use super::mocks::{mock_connection, MockPeer};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestClient {
    pub peer: MockPeer,
    pub task: JoinHandle<Result<(), SocketError>>,
}

pub struct TestSetup {
    pub registry: Arc<RoomRegistry>,
    pub room_service: RoomService,
    pub room_id: String,
    pub clients: HashMap<String, TestClient>,
    heartbeat_interval: Duration,
}

pub struct TestSetupBuilder {
    clients: Vec<String>,
    room_id: String,
    mailbox_capacity: usize,
    heartbeat_interval: Duration,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            clients: vec![],
            room_id: "room-123".to_string(),
            mailbox_capacity: 5,
            heartbeat_interval: Duration::from_secs(30),
        }
    }

    pub fn with_clients(mut self, clients: Vec<&str>) -> Self {
        self.clients = clients.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_one_client(self) -> Self {
        self.with_clients(vec!["alice"])
    }

    pub fn with_two_clients(self) -> Self {
        self.with_clients(vec!["alice", "bob"])
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub async fn build(self) -> TestSetup {
        let registry = Arc::new(RoomRegistry::new(self.mailbox_capacity));
        let room_service = RoomService::new(
            registry.clone(),
            Arc::new(UuidRoomIdGenerator::new()),
        );

        let mut setup = TestSetup {
            registry,
            room_service,
            room_id: self.room_id,
            clients: HashMap::new(),
            heartbeat_interval: self.heartbeat_interval,
        };

        for name in &self.clients {
            setup.connect(name).await;
        }

        setup
    }
}

impl TestSetup {
    /// Opens a new connection to the setup's room and waits until it is subscribed
    pub async fn connect(&mut self, name: &str) {
        let room_id = self.room_id.clone();
        let before = self.subscriber_count();
        let client = self.spawn_client(&room_id);
        self.clients.insert(name.to_string(), client);

        let expected = before + 1;
        super::assertions::wait_until(|| self.subscriber_count() >= expected).await;
    }

    /// Starts a handler for any room without waiting for it to subscribe
    pub fn spawn_client(&self, room_id: &str) -> TestClient {
        let (socket, peer) = mock_connection();
        let mut handler = ConnectionHandler::new(
            room_id.to_string(),
            Box::new(socket),
            self.registry.clone(),
            self.heartbeat_interval,
        );
        let task = tokio::spawn(async move { handler.run().await });
        TestClient { peer, task }
    }

    pub fn client(&mut self, name: &str) -> &mut TestClient {
        self.clients
            .get_mut(name)
            .unwrap_or_else(|| panic!("no client named {name}"))
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .peek(&self.room_id)
            .map(|bus| bus.subscriber_count())
            .unwrap_or(0)
    }
}
