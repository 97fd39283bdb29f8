//! # Connection Abstraction
//!
//! The dispatcher needs exactly two things from the transport: the next
//! message on a connection, and a way to send one back. [`Connection`] names
//! those two capabilities; [`WebSocket`] is the production implementation.

use std::future::Future;

use anyhow::Result;
use axum::extract::ws::{Message, WebSocket};
use log::trace;

/// One open bidirectional message channel with a peer.
pub trait Connection: Send {
    /// Deliver the next message from the peer.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))`: one complete message
    /// - `Ok(None)`: the peer closed the connection
    /// - `Err`: transport error
    fn read_message(&mut self) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Send one message to the peer.
    fn write_message(&mut self, text: String) -> impl Future<Output = Result<()>> + Send;
}

impl Connection for WebSocket {
    async fn read_message(&mut self) -> Result<Option<Vec<u8>>> {
        while let Some(frame) = self.recv().await {
            match frame? {
                Message::Text(text) => return Ok(Some(text.into_bytes())),
                Message::Binary(data) => return Ok(Some(data)),
                // Control frames are answered by the transport itself
                Message::Ping(_) | Message::Pong(_) => trace!("control frame"),
                Message::Close(_) => return Ok(None),
            }
        }
        Ok(None)
    }

    async fn write_message(&mut self, text: String) -> Result<()> {
        self.send(Message::Text(text)).await?;
        Ok(())
    }
}
