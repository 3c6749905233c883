//! Runtime configuration.
//!
//! All tunable parameters for the BLE side of the camera.  Loaded from a
//! JSON file at startup; every field has a default so a missing file or a
//! partial file is fine.

use core::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// BLE bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Object path of the EyeSpy GATT service.
    pub service_path: String,
    /// Position of the connection-status characteristic within the service.
    pub characteristic_index: u16,
    /// HCI adapter name.
    pub adapter: String,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_path: "/org/bluez/eyespy/service0".into(),
            characteristic_index: 2,
            adapter: "hci0".into(),
            log_level: "info".into(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Errors from loading or validating [`BridgeConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid JSON for this schema.
    Corrupted(serde_json::Error),
    /// A field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Corrupted(e) => write!(f, "config corrupted: {e}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn is_object_path(p: &str) -> bool {
    if p == "/" {
        return true;
    }
    p.starts_with('/')
        && !p.ends_with('/')
        && p[1..]
            .split('/')
            .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'))
}

impl BridgeConfig {
    /// Load from `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Config: {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };
        let config: Self = serde_json::from_str(&text).map_err(ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values BlueZ or the logger would refuse later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_object_path(&self.service_path) || self.service_path == "/" {
            return Err(ConfigError::ValidationFailed(
                "service_path must be an absolute D-Bus object path below /",
            ));
        }
        if self.adapter.is_empty() || !self.adapter.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ConfigError::ValidationFailed("adapter must be alphanumeric, e.g. hci0"));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed("log_level unknown"));
        }
        Ok(())
    }
}
