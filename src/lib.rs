//! # bot-gateway
//!
//! A minimal WebSocket relay for bot traffic. Every inbound JSON message gets
//! exactly one JSON reply on the same connection:
//!
//! - [`gateway`]: the listener service and the message dispatcher
//! - [`client`]: a one-shot client with a dry-run fallback
//! - [`common`]: wire records and configuration loading

pub mod client;
pub mod common;
pub mod gateway;
pub mod logging;

pub use common::messages::{DispatchError, Reply, Request};
pub use gateway::{Dispatcher, GatewayConfig, GatewayServer};
