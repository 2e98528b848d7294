//! CLI commands

pub mod badge;
pub mod batch;
pub mod init;
pub mod summary;

use anyhow::{Context, Result};
use serde_json::Value;
use vdr_badge_core::{resolve_href, BadgeConfig, BadgeStyle, Layout};

use crate::logging::DEFAULT_FILTER;
use crate::Cli;

/// Effective settings after merging config file, environment and flags
#[derive(Debug, Clone)]
pub struct Settings {
    /// `--href`, used verbatim when set
    pub explicit_href: Option<String>,
    pub base_url: Option<String>,
    pub rounded_pixels: u32,
    /// Config default for the combined badge layout
    pub stacked: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(BadgeConfig::default())
    }
}

impl Settings {
    /// Load the config file and apply environment and CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => BadgeConfig::from_file(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir().context("resolve working directory")?;
                BadgeConfig::find_and_load(&cwd)?
            }
        };
        config.apply_env_overrides();
        config.override_base_url(cli.base_url.clone());

        let mut settings = Self::from_config(config);
        settings.explicit_href = cli.href.clone();
        if let Some(rounded_pixels) = cli.rounded_pixels {
            settings.rounded_pixels = rounded_pixels;
        }
        Ok(settings)
    }

    pub fn from_config(config: BadgeConfig) -> Self {
        let log_filter = if config.log.filter.trim().is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            config.log.filter
        };

        Self {
            explicit_href: None,
            base_url: config.link.base_url,
            rounded_pixels: config.badge.rounded_pixels,
            stacked: config.badge.stacked,
            log_filter,
        }
    }

    /// Badge style for one VDR; the link may depend on its component
    pub fn style_for(&self, vdr: &Value) -> BadgeStyle {
        BadgeStyle::new(
            resolve_href(vdr, self.explicit_href.as_deref(), self.base_url.as_deref()),
            self.rounded_pixels,
        )
    }

    /// A layout flag from the command line wins over the config default
    pub fn layout(&self, stacked_override: Option<bool>) -> Layout {
        Layout::from_stacked(stacked_override.unwrap_or(self.stacked))
    }
}
