//! # Gateway Server
//!
//! The single long-lived listener service. It is constructed once at startup
//! from a [`GatewayConfig`] and owns everything the per-connection tasks need:
//!
//! ```text
//! TcpListener -> axum router -> WebSocket upgrade -> one tokio task per connection
//!                                                      └─ serve_connection(dispatcher, socket)
//! ```
//!
//! A failure on one connection ends only that connection's task.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::gateway::config::GatewayConfig;
use crate::gateway::dispatcher::{serve_connection, Dispatcher};

/// Route of the health check; the upgrade path may not reuse it.
const HEALTH_PATH: &str = "/health";

/// State shared with every axum handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    max_message_bytes: usize,
}

pub struct GatewayServer {
    config: GatewayConfig,
    dispatcher: Arc<Dispatcher>,
    /// Upgrade path, normalized to start with `/`
    ws_path: String,
}

impl GatewayServer {
    /// Create the gateway service from its configuration.
    ///
    /// # Example
    /// ```ignore
    /// let server = GatewayServer::new(GatewayConfig::default())?;
    /// server.run().await?;
    /// ```
    ///
    /// # Errors
    /// The configured upgrade path collides with the health check route.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let ws_path = normalize_path(&config.gateway.path);
        if ws_path == HEALTH_PATH {
            bail!(
                "gateway.path '{}' is reserved for the health check",
                config.gateway.path
            );
        }

        let dispatcher = Arc::new(Dispatcher::new(config.logging.log_chat));
        Ok(Self {
            config,
            dispatcher,
            ws_path,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the router: the WebSocket endpoint plus a health check.
    pub fn router(&self) -> Router {
        let state = AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            max_message_bytes: self.config.gateway.max_message_bytes,
        };

        Router::new()
            .route(&self.ws_path, get(ws_handler))
            .route(HEALTH_PATH, get(health_check))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(self) -> Result<()> {
        let address = self.config.gateway.address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {}", address))?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        info!(
            "🌐 Gateway WS listening on ws://{}{}",
            local_addr, self.ws_path
        );

        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.max_message_size(state.max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, peer, state.dispatcher))
}

/// Drive one upgraded connection until it closes.
async fn handle_socket(mut socket: WebSocket, peer: SocketAddr, dispatcher: Arc<Dispatcher>) {
    debug!("🔗 Client connected from {}", peer);

    match serve_connection(&dispatcher, &mut socket).await {
        Ok(handled) => debug!("👋 Client {} disconnected after {} messages", peer, handled),
        Err(e) => warn!("❌ Connection {} closed by transport error: {:#}", peer, e),
    }
}

/// Upgrade path with the leading `/` axum requires.
fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "bot-gateway"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_path(path: &str) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.gateway.path = path.to_string();
        config
    }

    #[test]
    fn ws_path_gets_leading_slash() {
        let server = GatewayServer::new(config_with_path("chat")).unwrap();
        assert_eq!(server.ws_path, "/chat");

        let server = GatewayServer::new(GatewayConfig::default()).unwrap();
        assert_eq!(server.ws_path, "/");
    }

    #[test]
    fn health_path_is_rejected() {
        for path in ["/health", "health", " /health "] {
            let err = GatewayServer::new(config_with_path(path))
                .err()
                .expect("path should be rejected");
            assert!(err.to_string().contains("reserved"), "{err}");
        }
    }

    #[test]
    fn nested_health_path_is_allowed() {
        assert!(GatewayServer::new(config_with_path("/health/ws")).is_ok());
    }
}
