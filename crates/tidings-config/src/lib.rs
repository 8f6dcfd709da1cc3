//! Shared configuration for tidings.
//!
//! TOML file in the platform config directory, layered under `TIDINGS_`
//! environment variables, and translation to `tidings_core::StoreConfig`.
//! Nested keys use a double underscore in the environment, e.g.
//! `TIDINGS_TOAST__DURATION_MS=5000`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tidings_core::StoreConfig;
use tidings_core::config::{DEFAULT_EVENT_CHANNEL, DEFAULT_TOAST_DURATION};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub toast: ToastSettings,

    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// Output defaults for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToastSettings {
    /// Milliseconds a toast stays visible.
    #[serde(default = "default_toast_ms")]
    pub duration_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_ms(),
        }
    }
}

fn default_toast_ms() -> u64 {
    u64::try_from(DEFAULT_TOAST_DURATION.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Event name emissions are addressed to. Empty is the shell default.
    #[serde(default = "default_event_channel")]
    pub event_channel: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            event_channel: default_event_channel(),
        }
    }
}

fn default_event_channel() -> String {
    DEFAULT_EVENT_CHANNEL.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when neither
    /// `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".into()
}

impl Config {
    /// Translate into the settings the core stores consume.
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        if self.toast.duration_ms == 0 {
            return Err(ConfigError::Validation {
                field: "toast.duration_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(StoreConfig {
            toast_duration: Duration::from_millis(self.toast.duration_ms),
            event_channel: self.backend.event_channel.clone(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "tidings", "tidings").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tidings");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TIDINGS_").split("__"))
}

/// Load config from `path` layered under the environment.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
