//! Configuration management for the `gradtage` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::GradtageError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradtageConfig {
    /// Weather archive settings
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Calculation defaults
    #[serde(default)]
    pub calculation: CalculationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Locations to calculate when none are given explicitly
    #[serde(default = "default_locations")]
    pub locations: Vec<Location>,
}

/// Weather archive API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Base URL of the archive API
    #[serde(default = "default_archive_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_archive_timeout")]
    pub timeout_seconds: u32,
    /// Transient transport retries inside the HTTP client
    #[serde(default)]
    pub max_retries: u32,
}

/// Calculation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Target indoor temperature in °C
    #[serde(default = "default_room_temperature")]
    pub room_temperature: f64,
    /// Outdoor temperature below which a day counts as heating day
    #[serde(default = "default_heating_limit")]
    pub heating_limit: f64,
    /// Upper bound for fetches in flight at once
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_archive_base_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

fn default_archive_timeout() -> u32 {
    30
}

fn default_room_temperature() -> f64 {
    crate::engine::DEFAULT_ROOM_TEMPERATURE
}

fn default_heating_limit() -> f64 {
    crate::engine::DEFAULT_HEATING_LIMIT
}

fn default_max_concurrent_fetches() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Berlin", 52.5244, 13.4105),
        Location::new("München", 48.1351, 11.5820),
        Location::new("Hamburg", 53.5511, 9.9937),
    ]
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_archive_base_url(),
            timeout_seconds: default_archive_timeout(),
            max_retries: 0,
        }
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            room_temperature: default_room_temperature(),
            heating_limit: default_heating_limit(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for GradtageConfig {
    fn default() -> Self {
        Self {
            archive: ArchiveConfig::default(),
            calculation: CalculationConfig::default(),
            logging: LoggingConfig::default(),
            locations: default_locations(),
        }
    }
}

impl GradtageConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. GRADTAGE_ARCHIVE__TIMEOUT_SECONDS=10
        builder = builder.add_source(
            Environment::with_prefix("GRADTAGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: GradtageConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gradtage").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.archive.base_url.is_empty() {
            self.archive.base_url = default_archive_base_url();
        }
        if self.archive.timeout_seconds == 0 {
            self.archive.timeout_seconds = default_archive_timeout();
        }
        if self.calculation.max_concurrent_fetches == 0 {
            self.calculation.max_concurrent_fetches = default_max_concurrent_fetches();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_locations()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.archive.timeout_seconds > 300 {
            return Err(
                GradtageError::config("Archive timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.archive.max_retries > 10 {
            return Err(GradtageError::config("Archive max retries cannot exceed 10").into());
        }

        if self.calculation.max_concurrent_fetches > 16 {
            return Err(
                GradtageError::config("Concurrent fetches cannot exceed 16").into(),
            );
        }

        if !(self.calculation.room_temperature > self.calculation.heating_limit) {
            return Err(GradtageError::config(format!(
                "Room temperature ({}) must exceed heating limit ({})",
                self.calculation.room_temperature, self.calculation.heating_limit
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GradtageError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GradtageError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.archive.base_url.starts_with("http://")
            && !self.archive.base_url.starts_with("https://")
        {
            return Err(GradtageError::config(
                "Archive base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    fn validate_locations(&self) -> Result<()> {
        for location in &self.locations {
            if location.name.trim().is_empty() {
                return Err(GradtageError::config("Configured location without a name").into());
            }
            if !location.has_valid_coordinates() {
                return Err(GradtageError::config(format!(
                    "Configured location {} has invalid coordinates ({})",
                    location.name,
                    location.format_coordinates()
                ))
                .into());
            }
        }
        Ok(())
    }
}
