//! Application configuration, read from an optional TOML file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analytics::DEFAULT_TOP_N;
use crate::engine::EngineConfig;
use crate::error::{LinehaulError, Result};
use crate::rules::AttributionRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for the newest trip export
    pub data_dir: PathBuf,
    /// Size of the ranked vendor view
    pub top_n: usize,
    pub rules: AttributionRules,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("raw-data"),
            top_n: DEFAULT_TOP_N,
            rules: AttributionRules::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            top_n: self.top_n,
            rules: self.rules.clone(),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LinehaulError::Config(e.to_string()))
    }

    /// Defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                info!("Loading configuration from {:?}", p);
                Self::from_toml(&fs::read_to_string(p)?)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("raw-data"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.rules.vendor_token, "VENDOR");
        assert_eq!(config.engine(), EngineConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            data_dir = "/srv/linehaul/raw"
            top_n = 5

            [rules]
            vendor_cancel_codes = ["DRIVER_NO_SHOW"]

            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/linehaul/raw"));
        assert_eq!(config.top_n, 5);
        assert!(config.rules.is_vendor_cancel_code("DRIVER_NO_SHOW"));
        assert!(!config.rules.is_vendor_cancel_code("VEHICLE_UNAVAILABILITY"));
        assert_eq!(config.rules.vendor_token, "VENDOR");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml("top_n = \"many\""),
            Err(LinehaulError::Config(_))
        ));
    }
}
