use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use thiserror::Error;

/// Simple WebSocket abstraction - all the relay needs is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text message to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next frame from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<InboundFrame>, SocketError>;

    /// Probe the peer; a live peer answers with a pong frame
    async fn send_ping(&mut self) -> Result<(), SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Anything the client sent; every variant counts as proof of life
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Message(String),
    Ping,
    Pong,
}

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("connection closed")]
    ConnectionClosed,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    #[error("peer silent for {0:?}")]
    PeerTimeout(std::time::Duration),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<InboundFrame>, SocketError> {
        match self.next().await {
            Some(Ok(Message::Text(text))) => Ok(Some(InboundFrame::Message(text))),
            Some(Ok(Message::Binary(data))) => Ok(Some(InboundFrame::Message(
                String::from_utf8_lossy(&data).into_owned(),
            ))),
            Some(Ok(Message::Ping(_))) => Ok(Some(InboundFrame::Ping)), // axum answers these itself
            Some(Ok(Message::Pong(_))) => Ok(Some(InboundFrame::Pong)),
            Some(Ok(Message::Close(_))) => Ok(None),
            Some(Err(e)) => Err(SocketError::ReceiveFailed(e.to_string())),
            None => Ok(None), // Connection closed
        }
    }

    async fn send_ping(&mut self) -> Result<(), SocketError> {
        self.send(Message::Ping(Vec::new()))
            .await
            .map_err(|_| SocketError::ConnectionClosed)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}
