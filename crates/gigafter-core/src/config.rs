//! Configuration types for gigafter.
//!
//! [`Config::load`] reads `~/.config/gigafter/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `GIGAFTER__*`
//! environment overrides (e.g. `GIGAFTER__STORE__URL`). [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use crate::auth::{AdminKey, KeyRegistry};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:8080"

[store]
backend = "memory"
url     = ""
api_key = ""
table   = "waitlist_signups"

[display]
utc_offset = "+00:00"

[ui]
show_stats = true
export_dir = "."
theme      = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Which record store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Rest,
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the hosted database (`rest` backend only).
    #[serde(default)]
    pub url: String,
    /// Sent as both the `apikey` header and the bearer token.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String { crate::types::SIGNUPS_TABLE.to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Offset used for signup dates in tables and exports, e.g. `-05:00`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_utc_offset() -> String { "+00:00".to_string() }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { utc_offset: default_utc_offset() }
    }
}

impl DisplayConfig {
    /// Parsed [`utc_offset`](Self::utc_offset); falls back to UTC when the
    /// value is malformed.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset.parse::<FixedOffset>().unwrap_or_else(|_| {
            tracing::warn!(value = %self.utc_offset, "invalid display.utc_offset; using UTC");
            Utc.fix()
        })
    }
}

/// `[ui]` section: admin console preferences.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_stats")]
    pub show_stats: bool,
    /// Directory CSV exports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Colour theme name (`default` or `gruvbox`).
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_stats() -> bool { true }
fn default_export_dir() -> PathBuf { PathBuf::from(".") }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_stats: default_show_stats(),
            export_dir: default_export_dir(),
            theme: default_theme(),
        }
    }
}

/// `[admin]` section: `[[admin.keys]]` entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub keys: Vec<AdminKey>,
}

impl AdminConfig {
    pub fn registry(&self) -> KeyRegistry {
        KeyRegistry::new(self.keys.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/gigafter/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("GIGAFTER").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("gigafter")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
