//! # Common Components
//!
//! Shared utilities and data structures used by both gateway and client components.
//!
//! ## Modules
//!
//! - [`messages`]: JSON request/reply records exchanged over the gateway
//! - [`config`]: Configuration parsing utilities

pub mod config;
pub mod messages;
