//! # Configuration Utilities
//!
//! Shared TOML loading used by both the gateway and the client binaries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error, annotated with the path
///
/// # Example
/// ```ignore
/// let config: GatewayConfig = load_config("config/gateway.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to the type's defaults.
pub fn load_config_or_default<T>(path: Option<&Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match path {
        Some(path) => load_config(path),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: String,
        #[serde(default)]
        port: u16,
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"gw\"\nport = 3000").unwrap();

        let sample: Sample = load_config(file.path()).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "gw".to_string(),
                port: 3000
            }
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config::<Sample>("/definitely/not/here.toml").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        assert!(load_config::<Sample>(file.path()).is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        let sample: Sample = load_config_or_default(None).unwrap();
        assert_eq!(sample, Sample::default());
    }
}
