//! # Gateway
//!
//! The WebSocket side of the relay:
//!
//! - [`dispatcher`]: maps each inbound message to exactly one reply
//! - [`connection`]: the transport capabilities the dispatcher relies on
//! - [`server`]: the listener service hosting all connections
//! - [`config`]: gateway configuration

pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod server;

pub use config::GatewayConfig;
pub use dispatcher::Dispatcher;
pub use server::GatewayServer;
