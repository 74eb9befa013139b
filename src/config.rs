//! # Configuration System
//!
//! Provides YAML-based configuration for thermolink receivers, including:
//!
//! - Link timing (sender bit window, sensor sampling period, hysteresis
//!   tolerance)
//! - Error correction settings (block size, enable/disable)
//! - Logging configuration
//! - Named link profiles for different deployments
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `THERMOLINK_CONFIG` environment variable
//! 2. `./thermolink.yaml` (current directory)
//! 3. `~/.config/thermolink/config.yaml` (user config)
//! 4. `/etc/thermolink/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! link:
//!   bit_interval_ms: 3000
//!   sample_period_ms: 10
//!
//! code:
//!   enabled: true
//!   block_size: 16
//!
//! logging:
//!   level: "info"
//!   format: "compact"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::syndrome_map::SyndromeMap;

/// Error type for configuration operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Link timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Sender bit window in milliseconds.
    pub bit_interval_ms: u64,
    /// Sensor sampling period in milliseconds.
    pub sample_period_ms: u64,
    /// Hysteresis tolerance in °C. When omitted it is derived from the bit
    /// interval: longer windows drift further, so the band scales with them.
    pub tolerance_c: Option<f64>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bit_interval_ms: 3000,
            sample_period_ms: 10,
            tolerance_c: None,
        }
    }
}

impl LinkConfig {
    /// Sensor samples per bit window.
    pub fn samples_per_bit(&self) -> usize {
        (self.bit_interval_ms / self.sample_period_ms.max(1)) as usize
    }

    /// Effective hysteresis tolerance: the explicit value, or
    /// `bit_interval_ms / 10000` (3000 ms → 0.3 °C).
    pub fn tolerance(&self) -> f64 {
        self.tolerance_c
            .unwrap_or(self.bit_interval_ms as f64 / 10_000.0)
    }

    /// Bit window in seconds.
    pub fn bit_period_s(&self) -> f64 {
        self.bit_interval_ms as f64 / 1000.0
    }
}

/// Error correction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Apply extended Hamming correction to the demodulated stream.
    pub enabled: bool,
    /// Codeword length in bits (power of two, >= 4).
    pub block_size: usize,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_size: 16,
        }
    }
}

/// Logging configuration (config-file surface).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Convert to the programmatic logging configuration.
    ///
    /// Unknown strings fall back to the defaults (info, compact).
    pub fn to_log_config(&self) -> crate::observe::logging::LogConfig {
        use crate::observe::logging::{LogConfig, LogFormat, LogLevel};

        let level = match self.level.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        };
        let format = match self.format.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        LogConfig {
            level,
            format,
            ..LogConfig::default()
        }
    }
}

/// Complete thermolink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermolinkConfig {
    /// Configuration version
    pub version: String,
    /// Link timing
    pub link: LinkConfig,
    /// Error correction
    pub code: CodeConfig,
    /// Logging
    pub logging: LoggingConfig,
    /// Named link profiles (deployment -> link settings)
    pub profiles: HashMap<String, LinkConfig>,
}

impl Default for ThermolinkConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            link: LinkConfig::default(),
            code: CodeConfig::default(),
            logging: LoggingConfig::default(),
            profiles: HashMap::new(),
        }
    }
}

impl ThermolinkConfig {
    /// Load configuration from the default search path.
    ///
    /// Search order:
    /// 1. `THERMOLINK_CONFIG` environment variable
    /// 2. `./thermolink.yaml`
    /// 3. `~/.config/thermolink/config.yaml`
    /// 4. `/etc/thermolink/config.yaml`
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        // Check environment variable first
        if let Ok(path) = std::env::var("THERMOLINK_CONFIG") {
            if Path::new(&path).exists() {
                return Self::load_from(Path::new(&path));
            }
        }

        // Check standard paths
        let paths = Self::config_search_paths();
        for path in &paths {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        // No config found, return defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Apply a link profile by name.
    ///
    /// Replaces the link section with the named profile's settings.
    pub fn with_profile(&self, name: &str) -> Result<Self, ConfigError> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(format!("profile '{}' not found", name)))?;

        let mut config = self.clone();
        config.link = profile.clone();
        Ok(config)
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./thermolink.yaml")];

        // User config directory
        if let Some(config_dir) = directories::ProjectDirs::from("", "", "thermolink") {
            paths.push(config_dir.config_dir().join("config.yaml"));
        }

        // System config
        paths.push(PathBuf::from("/etc/thermolink/config.yaml"));

        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link.bit_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "bit_interval_ms must be > 0".to_string(),
            ));
        }
        if self.link.sample_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "sample_period_ms must be > 0".to_string(),
            ));
        }
        if self.link.sample_period_ms > self.link.bit_interval_ms {
            return Err(ConfigError::ValidationError(
                "sample_period_ms must not exceed bit_interval_ms".to_string(),
            ));
        }
        if let Some(tolerance) = self.link.tolerance_c {
            if tolerance < 0.0 || tolerance.is_nan() {
                return Err(ConfigError::ValidationError(
                    "tolerance_c must be >= 0".to_string(),
                ));
            }
        }
        if self.code.enabled && SyndromeMap::new(self.code.block_size).is_err() {
            return Err(ConfigError::ValidationError(
                "block_size must be a power of two >= 4".to_string(),
            ));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            profiles: {
                let mut profiles = HashMap::new();
                profiles.insert(
                    "fast".to_string(),
                    LinkConfig {
                        bit_interval_ms: 1000,
                        sample_period_ms: 10,
                        tolerance_c: None,
                    },
                );
                profiles.insert(
                    "conservative".to_string(),
                    LinkConfig {
                        bit_interval_ms: 5000,
                        sample_period_ms: 10,
                        tolerance_c: Some(0.5),
                    },
                );
                profiles
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}
