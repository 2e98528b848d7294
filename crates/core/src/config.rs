//! Configuration file parsing for .vdr-badge.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::badge::DEFAULT_ROUNDED_PIXELS;

/// Config file name looked up from the working directory upwards
pub const CONFIG_FILE_NAME: &str = ".vdr-badge.toml";

/// Environment variable overriding `link.base_url`
pub const BASE_URL_ENV: &str = "VDR_BADGE_BASE_URL";

/// Main configuration structure for .vdr-badge.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeConfig {
    #[serde(default)]
    pub badge: BadgeDefaults,

    #[serde(default)]
    pub link: LinkConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefaults {
    /// Corner radius in pixels
    #[serde(default = "default_rounded_pixels")]
    pub rounded_pixels: u32,

    /// Stack the combined badge vertically instead of side by side
    #[serde(default)]
    pub stacked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Prefix for links built from the VDR component name and version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_rounded_pixels() -> u32 {
    DEFAULT_ROUNDED_PIXELS
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for BadgeDefaults {
    fn default() -> Self {
        Self {
            rounded_pixels: default_rounded_pixels(),
            stacked: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl BadgeConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BadgeConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .vdr-badge.toml from the given directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `VDR_BADGE_BASE_URL` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.override_base_url(std::env::var(BASE_URL_ENV).ok());
    }

    /// Replace the base URL when `value` is set and non-blank
    pub fn override_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.link.base_url = Some(url);
        }
    }
}
