use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client configuration loaded from a TOML file.
///
/// # Example TOML
///
/// ```toml
/// [client]
/// url = "ws://localhost:3000"
/// timeout_ms = 2500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: ClientInfo,
}

/// Gateway location and request timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    /// WebSocket URL of the gateway
    #[serde(default = "default_url")]
    pub url: String,
    /// Upper bound for one connect/send/receive exchange (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientInfo {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_url() -> String {
    "ws://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    2500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_gateway() {
        let config = ClientConfig::default();
        assert_eq!(config.client.url, "ws://localhost:3000");
        assert_eq!(config.client.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: ClientConfig =
            toml::from_str("[client]\nurl = \"ws://10.0.0.5:3000/\"\ntimeout_ms = 100\n").unwrap();
        assert_eq!(config.client.url, "ws://10.0.0.5:3000/");
        assert_eq!(config.client.timeout_ms, 100);
    }
}
