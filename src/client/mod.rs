//! # Client Components
//!
//! A minimal WebSocket client for the gateway, used by callers that want to
//! hand one action to the gateway and read its reply.
//!
//! When the gateway cannot be reached the client does not fail: it reports a
//! dry-run outcome carrying the original action, so callers keep working in
//! environments where no gateway is running.

pub mod client;
pub mod config;

pub use client::{GatewayClient, Outcome};
pub use config::ClientConfig;
