//! Analysis service configuration.
//!
//! Provides two loading methods:
//! - `default_config()` - The settings embedded in the binary
//! - `load_config(path)` - Settings read from a TOML file
//!
//! `resolve_config()` picks the user override from the platform config
//! directory when it exists and parses, and the embedded default otherwise.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Embedded at compile time from `src-tauri/config/service.toml`.
const DEFAULT_CONFIG: &str = include_str!("../config/service.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    service: ServiceConfig,
}

fn parse_config(content: &str) -> Result<ServiceConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let config = file.service;
    ensure!(!config.base_url.trim().is_empty(), "base_url must not be empty");
    ensure!(
        config.request_timeout_secs > 0,
        "request_timeout_secs must be at least 1"
    );
    Ok(config)
}

/// Load service settings from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// # Panics
/// Panics if the embedded TOML is invalid (a build-time mistake).
pub fn default_config() -> ServiceConfig {
    parse_config(DEFAULT_CONFIG).expect("embedded service.toml must be valid")
}

/// `<config_dir>/studyhabits/service.toml`
pub fn override_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("studyhabits").join("service.toml"))
}

pub fn resolve_config() -> ServiceConfig {
    resolve_from(override_path().as_deref())
}

fn resolve_from(path: Option<&Path>) -> ServiceConfig {
    let Some(path) = path.filter(|p| p.exists()) else {
        return default_config();
    };

    match load_config(path) {
        Ok(config) => {
            info!("Loaded service config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring invalid service config {:?}: {}", path, e);
            default_config()
        }
    }
}
