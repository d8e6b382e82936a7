use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use hangout::{InboundFrame, SocketError, SocketWrapper};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Server side of an in-memory connection
pub struct MockSocket {
    outbound: mpsc::UnboundedSender<String>,
    inbound: mpsc::UnboundedReceiver<String>,
    broken: Arc<AtomicBool>,
    silent: Arc<AtomicBool>,
    pings: Arc<AtomicUsize>,
    pending_pongs: usize,
}

/// Client side of an in-memory connection, held by the test
pub struct MockPeer {
    received: mpsc::UnboundedReceiver<String>,
    inbound: Option<mpsc::UnboundedSender<String>>,
    broken: Arc<AtomicBool>,
    silent: Arc<AtomicBool>,
    pings: Arc<AtomicUsize>,
}

pub fn mock_connection() -> (MockSocket, MockPeer) {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let broken = Arc::new(AtomicBool::new(false));
    let silent = Arc::new(AtomicBool::new(false));
    let pings = Arc::new(AtomicUsize::new(0));

    let socket = MockSocket {
        outbound: outbound_tx,
        inbound: inbound_rx,
        broken: broken.clone(),
        silent: silent.clone(),
        pings: pings.clone(),
        pending_pongs: 0,
    };
    let peer = MockPeer {
        received: outbound_rx,
        inbound: Some(inbound_tx),
        broken,
        silent,
        pings,
    };
    (socket, peer)
}

impl MockPeer {
    /// Next message delivered to this client, if any arrives in time
    pub async fn next_message(&mut self) -> Option<String> {
        tokio::time::timeout(Duration::from_millis(500), self.received.recv())
            .await
            .ok()
            .flatten()
    }

    /// Messages already delivered, without waiting
    pub fn drain(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.received.try_recv().ok()).collect()
    }

    /// Client sends a frame; the relay should ignore it
    pub fn send(&self, message: &str) {
        if let Some(inbound) = &self.inbound {
            let _ = inbound.send(message.to_string());
        }
    }

    /// Clean close from the client side
    pub fn disconnect(&mut self) {
        self.inbound = None;
    }

    /// Transport dies silently: no close frame, every write fails
    pub fn break_transport(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    /// Half-open connection: writes still succeed but nothing ever comes back
    pub fn go_silent(&self) {
        self.silent.store(true, Ordering::SeqCst);
    }

    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocketWrapper for MockSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(SocketError::SendFailed("broken pipe".to_string()));
        }
        self.outbound
            .send(message)
            .map_err(|_| SocketError::ConnectionClosed)
    }

    async fn receive_message(&mut self) -> Result<Option<InboundFrame>, SocketError> {
        if self.pending_pongs > 0 {
            self.pending_pongs -= 1;
            return Ok(Some(InboundFrame::Pong));
        }
        Ok(self.inbound.recv().await.map(InboundFrame::Message))
    }

    async fn send_ping(&mut self) -> Result<(), SocketError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(SocketError::ConnectionClosed);
        }
        self.pings.fetch_add(1, Ordering::SeqCst);
        if !self.silent.load(Ordering::SeqCst) {
            self.pending_pongs += 1;
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        Ok(())
    }
}
