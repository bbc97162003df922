//! Configuration loading for the terminal host
//!
//! Priority order (highest first):
//! 1. Environment variables (`MASCOT_*`)
//! 2. TOML configuration file
//! 3. Default values
//!
//! The file lives at `$XDG_CONFIG_HOME/mascot/mascot.toml`. Its format is
//! documented on [`MascotConfig`].
//!
//! # Environment Variables
//!
//! - `MASCOT_FPS`: host frame rate
//! - `MASCOT_SIZE`: default size (`md` or `lg`)
//! - `MASCOT_FLOATING`: float wrapper on or off (`true`/`false`)
//! - `MASCOT_ACCENT`: default accent (`primary`, `secondary`, `emerald`)
//! - `MASCOT_COVER_CYCLE_MS`: covering-hands cycle duration

use std::fmt;
use std::path::{Path, PathBuf};

use mascot_core::{AccentTone, ConfigError, MascotConfig, MascotSize};
use tracing::{debug, info, warn};

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Loaded configuration plus where it came from
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedConfig {
    /// The configuration
    pub config: MascotConfig,
    /// Highest-priority source that contributed a value
    pub source: ConfigSource,
    /// File that was read, if any
    pub path: Option<PathBuf>,
}

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/mascot/mascot.toml` or
/// `~/.config/mascot/mascot.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mascot").join("mascot.toml"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read, parsed,
/// or validated. A missing config file is not an error.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    load_config_from_path(default_config_path().as_deref())
}

/// Load configuration from a specific path and the environment
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if
/// the merged configuration fails validation.
pub fn load_config_from_path(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let mut loaded = LoadedConfig {
        config: MascotConfig::default(),
        source: ConfigSource::Default,
        path: None,
    };

    if let Some(config_path) = path {
        if config_path.exists() {
            let content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            loaded.config = MascotConfig::from_toml_str(&content)?;
            loaded.source = ConfigSource::File;
            loaded.path = Some(config_path.to_path_buf());

            info!(path = %config_path.display(), "Loaded configuration from file");
        } else {
            debug!(path = %config_path.display(), "Config file not found, using defaults");
        }
    }

    apply_env_config(&mut loaded, |key| std::env::var(key).ok());
    loaded.config.validate()?;

    Ok(loaded)
}

/// Apply `MASCOT_*` overrides read through `lookup`
///
/// Unparseable values are logged and ignored.
pub fn apply_env_config(loaded: &mut LoadedConfig, lookup: impl Fn(&str) -> Option<String>) {
    let config = &mut loaded.config;
    let mut touched = false;

    if let Some(fps) = parse_var(&lookup, "MASCOT_FPS", |v| v.parse::<u32>().ok()) {
        config.surface.fps = fps;
        touched = true;
    }
    if let Some(size) = parse_var(&lookup, "MASCOT_SIZE", parse_size) {
        config.defaults.size = size;
        touched = true;
    }
    if let Some(floating) = parse_var(&lookup, "MASCOT_FLOATING", |v| v.parse::<bool>().ok()) {
        config.defaults.floating = floating;
        touched = true;
    }
    if let Some(accent) = parse_var(&lookup, "MASCOT_ACCENT", parse_accent) {
        config.defaults.accent = accent;
        touched = true;
    }
    if let Some(ms) = parse_var(&lookup, "MASCOT_COVER_CYCLE_MS", |v| v.parse::<u64>().ok()) {
        config.timing.cover_cycle_ms = ms;
        touched = true;
    }

    if touched {
        loaded.source = ConfigSource::Env;
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, value = %raw, "Ignoring unparseable environment override");
    }
    parsed
}

fn parse_size(value: &str) -> Option<MascotSize> {
    match value.to_ascii_lowercase().as_str() {
        "md" => Some(MascotSize::Md),
        "lg" => Some(MascotSize::Lg),
        _ => None,
    }
}

fn parse_accent(value: &str) -> Option<AccentTone> {
    match value.to_ascii_lowercase().as_str() {
        "primary" => Some(AccentTone::Primary),
        "secondary" => Some(AccentTone::Secondary),
        "emerald" => Some(AccentTone::Emerald),
        _ => None,
    }
}
