//! # Gateway Client
//!
//! Sends one JSON action to the gateway and waits for its single reply.
//!
//! ```rust,ignore
//! use bot_gateway::client::GatewayClient;
//!
//! let client = GatewayClient::new("ws://localhost:3000", Duration::from_millis(2500));
//! let outcome = client
//!     .execute_action(json!({"type": "chat", "text": "hello"}))
//!     .await;
//! println!("{}", outcome.into_value());
//! ```

use std::time::Duration;

use anyhow::{anyhow, Result};
use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use serde_json::{json, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::client::config::ClientInfo;

/// Result of [`GatewayClient::execute_action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The gateway answered; carries its reply as decoded JSON.
    Delivered(Value),
    /// The gateway was not reachable; carries the action that was not sent.
    DryRun(Value),
}

impl Outcome {
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Outcome::DryRun(_))
    }

    /// Flatten to the JSON shape callers consume.
    ///
    /// A dry run becomes `{"ok":true,"dry_run":true,"action":..}`.
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Delivered(reply) => reply,
            Outcome::DryRun(action) => json!({
                "ok": true,
                "dry_run": true,
                "action": action,
            }),
        }
    }
}

pub struct GatewayClient {
    url: String,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(info: &ClientInfo) -> Self {
        Self::new(info.url.clone(), info.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `action` to the gateway and return its reply.
    ///
    /// The whole exchange (connect, send, receive) is bounded by the client
    /// timeout. Any failure yields [`Outcome::DryRun`] instead of an error.
    pub async fn execute_action(&self, action: Value) -> Outcome {
        match tokio::time::timeout(self.timeout, self.exchange(&action)).await {
            Ok(Ok(reply)) => Outcome::Delivered(reply),
            Ok(Err(e)) => {
                warn!("⚠️ Gateway {} unavailable, dry run: {:#}", self.url, e);
                Outcome::DryRun(action)
            }
            Err(_) => {
                warn!(
                    "⏰ Gateway {} did not answer within {:?}, dry run",
                    self.url, self.timeout
                );
                Outcome::DryRun(action)
            }
        }
    }

    /// One connect/send/receive round trip.
    async fn exchange(&self, action: &Value) -> Result<Value> {
        let (mut ws, _) = connect_async(self.url.as_str()).await?;
        debug!("🔗 Connected to gateway {}", self.url);

        ws.send(Message::Text(serde_json::to_string(action)?)).await?;

        let reply = loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => break serde_json::from_str(&text)?,
                Some(Ok(Message::Binary(data))) => break serde_json::from_slice(&data)?,
                Some(Ok(Message::Close(_))) | None => {
                    return Err(anyhow!("connection closed before a reply arrived"))
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        };

        // Best effort; the reply is already in hand
        let _ = ws.close(None).await;
        Ok(reply)
    }
}
