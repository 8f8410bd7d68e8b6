//! TOML configuration parsing and validation.
//!
//! ```toml
//! [data]
//! source = "data/data.json"          # local path or http(s) URL
//!
//! [display]
//! locale = "es"                      # es | en
//! timestamp_format = "%d/%m/%Y, %H:%M:%S"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! site_root = "."                    # optional, served under /site
//! ```
//!
//! Every section is optional; missing values fall back to the defaults above.

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, Offset};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use research_catalog_core::controller::{DisplayOptions, DEFAULT_TIMESTAMP_FORMAT};
use research_catalog_core::Locale;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Dataset location: a filesystem path or an `http(s)://` URL.
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

fn default_source() -> String {
    "data/data.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_locale() -> String {
    "es".to_string()
}
fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory served under `/site`, so relative PDF paths resolve.
    #[serde(default)]
    pub site_root: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            site_root: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Config {
    /// Defaults for every section, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Parsed display locale. Validated by [`load_config`].
    pub fn locale(&self) -> Result<Locale> {
        Ok(self.display.locale.parse::<Locale>()?)
    }

    /// Controller display options; timestamps are shown in the local zone.
    pub fn display_options(&self) -> Result<DisplayOptions> {
        Ok(DisplayOptions {
            locale: self.locale()?,
            timestamp_format: self.display.timestamp_format.clone(),
            utc_offset: Local::now().offset().fix(),
        })
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!("no config at {}, using defaults", path.display());
        Ok(Config::minimal())
    }
}

pub fn validate(config: &Config) -> Result<()> {
    if config.data.source.trim().is_empty() {
        anyhow::bail!("data.source must not be empty");
    }

    config
        .locale()
        .with_context(|| "display.locale is invalid")?;

    if config.display.timestamp_format.is_empty() {
        anyhow::bail!("display.timestamp_format must not be empty");
    }
    if StrftimeItems::new(&config.display.timestamp_format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!(
            "display.timestamp_format is not a valid strftime pattern: '{}'",
            config.display.timestamp_format
        );
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}
