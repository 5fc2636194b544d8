//! Configuration loaded from a TOML file.
//!
//! Every field has a default matching the documentation site this tool was built for,
//! so an absent or partial file is fine.

use crate::catalog::PageExtractor;
use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "DOCSITE_FILTER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub layout: SiteLayout,
    pub search: SearchSettings,
    pub placeholders: PlaceholderSettings,
    pub cache: CacheSettings,
}

/// CSS selectors describing where entries live on a page.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteLayout {
    /// Entry container; must carry the entry `id`.
    pub entry: String,
    /// Display name, searched inside the entry.
    pub title: String,
    /// Code snippets, searched inside the entry.
    pub snippet: String,
    /// Table cell holding comma-separated supported versions.
    pub versions: String,
    /// Sidebar anchors pointing at `#<entry id>`.
    pub nav_link: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            entry: "div.item-wrapper".to_string(),
            title: ".item-title h1".to_string(),
            snippet: ".item-details .skript-code-block".to_string(),
            versions: ".item-details:nth-child(2) td:nth-child(2)".to_string(),
            nav_link: "#nav-contents a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Delay between the last keystroke and the filter run.
    pub settle_delay_ms: u64,
}

impl SearchSettings {
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderSettings {
    pub enabled: bool,
    /// `owner/name` of the repository whose releases are listed.
    pub repository: String,
    pub api_base: String,
    pub contributors_per_page: u32,
}

impl Default for PlaceholderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            repository: "SkriptLang/Skript".to_string(),
            api_base: "https://api.github.com".to_string(),
            contributors_per_page: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CacheSettings {
    /// Maximum number of parsed pages kept in memory.
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { capacity: 32 }
    }
}

impl Config {
    /// Parse a config from TOML text and validate its selectors.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from the first location that exists:
    /// the explicit path, `$DOCSITE_FILTER_CONFIG`, then the user config directory.
    ///
    /// An explicit path that does not exist is an error; the fallbacks are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            return Self::load_file(&path);
        }

        if let Some(path) = default_config_path()
            && path.is_file()
        {
            return Self::load_file(&path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        PageExtractor::new(&self.layout)?;
        anyhow::ensure!(self.cache.capacity > 0, "cache.capacity must be at least 1");
        Ok(())
    }
}

/// `<config dir>/docsite-filter/config.toml`, when a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docsite-filter").join("config.toml"))
}
