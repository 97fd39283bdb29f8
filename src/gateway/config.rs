use serde::{Deserialize, Serialize};

/// Complete gateway configuration loaded from a TOML file.
///
/// Every section and field is optional; missing values take the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub gateway: ListenConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how the gateway accepts WebSocket connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// Socket address to bind (e.g. "0.0.0.0:3000")
    #[serde(default = "default_address")]
    pub address: String,
    /// HTTP path that accepts the WebSocket upgrade
    #[serde(default = "default_path")]
    pub path: String,
    /// Largest accepted frame, in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            path: default_path(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit an INFO record with the text of every chat message
    #[serde(default = "default_log_chat")]
    pub log_chat: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_chat: default_log_chat(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_max_message_bytes() -> usize {
    100 * 1024 * 1024 // 100 MiB
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_chat() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.gateway.address, "0.0.0.0:3000");
        assert_eq!(config.gateway.path, "/");
        assert_eq!(config.gateway.max_message_bytes, 100 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_chat);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [gateway]
            address = "127.0.0.1:4000"
            path = "/ws"
            max_message_bytes = 65536

            [logging]
            level = "debug"
            log_chat = false
        "#;

        let config: GatewayConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.address, "127.0.0.1:4000");
        assert_eq!(config.gateway.path, "/ws");
        assert_eq!(config.gateway.max_message_bytes, 65536);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.log_chat);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("[gateway]\npath = \"/chat\"\n").unwrap();
        assert_eq!(config.gateway.address, "0.0.0.0:3000");
        assert_eq!(config.gateway.path, "/chat");
        assert_eq!(config.logging.level, "info");

        let empty: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(empty.gateway.address, "0.0.0.0:3000");
    }
}
