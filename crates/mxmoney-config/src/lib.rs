//! Configuration management for mxmoney
//!
//! This module handles loading, validation, and management of
//! mxmoney configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Transaction snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON transaction snapshot
    #[serde(default = "default_snapshot_path")]
    pub snapshot: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/transactions.json")
}

/// Category bucket settings for the spending breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Bucket name for transactions without a category
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
    /// Color for buckets whose category carries no color
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            uncategorized_label: default_uncategorized_label(),
            fallback_color: default_fallback_color(),
        }
    }
}

fn default_uncategorized_label() -> String {
    "Sem categoria".to_string()
}

fn default_fallback_color() -> String {
    "#64748b".to_string()
}

/// Calendar view settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    /// First day of the week in the calendar grid
    #[serde(default)]
    pub week_start: WeekStart,
}

/// First weekday of a calendar row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl std::str::FromStr for WeekStart {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(format!("Invalid week start: {}", s)),
        }
    }
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

/// Number and currency display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol printed before amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
        }
    }
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Snapshot settings
    #[serde(default)]
    pub data: DataConfig,
    /// Category bucket settings
    #[serde(default)]
    pub categories: CategoriesConfig,
    /// Calendar settings
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Number display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.uncategorized_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories.uncategorized_label".to_string(),
                reason: "Label must not be empty".to_string(),
            });
        }

        if !is_hex_color(&self.categories.fallback_color) {
            return Err(ConfigError::InvalidValue {
                field: "categories.fallback_color".to_string(),
                reason: "Color must be #rgb or #rrggbb".to_string(),
            });
        }

        if self.display.decimal_separator.is_empty() {
            return Err(ConfigError::MissingField {
                field: "display.decimal_separator".to_string(),
            });
        }

        if self.display.thousands_separator == self.display.decimal_separator {
            return Err(ConfigError::ValidationError {
                message: "Thousands and decimal separators must differ".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
