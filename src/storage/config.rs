//! W' model configuration.
//!
//! Model constants live in a TOML file in the platform data directory. A
//! missing file yields the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Policy when no second of the ride is below CP and tau has no denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TauFallback {
    /// Use the largest tau the formula can produce (862s)
    #[default]
    Maximum,
    /// Do not model depletion; balance stays at W'
    SkipDepletion,
}

impl std::fmt::Display for TauFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TauFallback::Maximum => write!(f, "Maximum"),
            TauFallback::SkipDepletion => write!(f, "Skip depletion"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WPrimeConfig {
    /// Configuration version
    pub version: String,
    /// Balance model settings
    pub model: ModelSettings,
    /// Match detection settings
    pub matches: MatchSettings,
    /// Result cache settings
    pub cache: CacheSettings,
}

impl Default for WPrimeConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: ModelSettings::default(),
            matches: MatchSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

/// Balance model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Trailing samples summed per balance point (1200 = 20 minutes)
    pub decay_window_secs: usize,
    /// CP used when no zone provider is available at all
    pub fallback_cp: f64,
    /// W' used when no zone provider is available at all
    pub fallback_w_prime: f64,
    /// What to do when tau cannot be estimated
    pub tau_fallback: TauFallback,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            decay_window_secs: 1200,
            fallback_cp: 250.0,
            fallback_w_prime: 0.0,
            tau_fallback: TauFallback::Maximum,
        }
    }
}

/// Match detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Rolling average window used to bridge short dips
    pub smoothing_secs: usize,
    /// Matches cheaper than this are noise
    pub min_cost_joules: f64,
    /// Matches at least this expensive are annotated
    pub significant_cost_joules: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            smoothing_secs: 25,
            min_cost_joules: 100.0,
            significant_cost_joules: 2000.0,
        }
    }
}

/// Result cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached analyses
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { max_entries: 32 }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rustride", "WBal")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Get the zone history file path.
pub fn get_zones_path() -> PathBuf {
    get_data_dir().join("zones.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<WPrimeConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from a file, falling back to defaults if it is absent.
pub fn load_config_from(path: &Path) -> Result<WPrimeConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(WPrimeConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save configuration to the default location.
pub fn save_config(config: &WPrimeConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to a file.
pub fn save_config_to(config: &WPrimeConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
