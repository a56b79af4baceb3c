//! Reminder configuration

use std::path::{Path, PathBuf};

use entities::{Category, LeadTimeConfig};
use serde::{Deserialize, Serialize};

use crate::{ChannelConfig, Locale, DEFAULT_FAN_OUT_CONCURRENCY};

/// Reminder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Lead times used until the user saves their own
    #[serde(default)]
    pub default_lead_times: LeadTimeConfig,

    /// Language of notification text
    #[serde(default)]
    pub locale: Locale,

    /// Items rescheduled concurrently when lead times change
    #[serde(default = "default_fan_out_concurrency")]
    pub fan_out_concurrency: usize,

    /// Notification channel settings
    #[serde(default)]
    pub channel: ChannelConfig,
}

fn default_fan_out_concurrency() -> usize {
    DEFAULT_FAN_OUT_CONCURRENCY
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_lead_times: LeadTimeConfig::default(),
            locale: Locale::default(),
            fan_out_concurrency: default_fan_out_concurrency(),
            channel: ChannelConfig::default(),
        }
    }
}

impl ReminderConfig {
    /// Load configuration from the first config file found, then apply
    /// environment overrides (env takes precedence)
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(contents)?;
        config.fan_out_concurrency = config.fan_out_concurrency.max(1);
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Override fields from `SHELF_*` variables resolved through `lookup`.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(tag) = lookup("SHELF_LOCALE") {
            match Locale::parse(&tag) {
                Some(locale) => self.locale = locale,
                None => tracing::warn!(
                    locale = %tag,
                    "Unsupported locale, keeping {}",
                    self.locale.code()
                ),
            }
        }

        if let Some(n) =
            lookup("SHELF_FAN_OUT_CONCURRENCY").and_then(|v| v.parse::<usize>().ok())
        {
            self.fan_out_concurrency = n.max(1);
        }

        let overrides = [
            (Category::Food, "SHELF_FOOD_LEAD_TIME"),
            (Category::Medicine, "SHELF_MEDICINE_LEAD_TIME"),
            (Category::Cosmetics, "SHELF_COSMETICS_LEAD_TIME"),
        ];
        for (category, key) in overrides {
            if let Some(days) = lookup(key).and_then(|v| v.parse::<u32>().ok()) {
                self.default_lead_times = self.default_lead_times.with_category(category, days);
            }
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut locations = vec![PathBuf::from("shelf.toml")];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("shelf").join("config.toml"));
        }

        locations.into_iter().find(|p| p.exists())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
