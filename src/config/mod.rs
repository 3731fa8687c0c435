//! Runtime configuration.
//!
//! The storage prefix doubles as a schema-version tag: bumping it retires
//! every previously cached KV value on the next boot.

use config::{Config as Cfg, File};
use serde::Deserialize;

use crate::error::StoreError;

#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Namespace prepended to every KV key.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,

    /// Directory for the file-backed KV store.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Whether the order broadcast channel is wired up.
    #[serde(default)]
    pub broadcast_enabled: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_prefix() -> String {
    "acai_core_v1_".to_string()
}

fn default_data_dir() -> String {
    "./data/state".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_prefix: default_storage_prefix(),
            data_dir: default_data_dir(),
            broadcast_enabled: false,
            log_level: default_log_level(),
        }
    }
}

impl CoreConfig {
    pub fn load() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("STOREFRONT").separator("__"))
            .build()
            .map_err(|e| StoreError::Persistence(anyhow::Error::new(e)))?;

        config
            .try_deserialize()
            .map_err(|e| StoreError::Persistence(anyhow::Error::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = CoreConfig::default();
        assert!(cfg.storage_prefix.ends_with('_'));
        assert!(!cfg.broadcast_enabled);
    }
}
