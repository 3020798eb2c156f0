//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `venuebook.toml` in the working directory unless a path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use venuebook_domain::availability::MinimumStay;

const DEFAULT_PATH: &str = "venuebook.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Booking policy.
    pub booking: BookingConfig,
    /// Data file locations.
    pub store: StoreConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Booking policy settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Nights required per stay and per bookable gap.
    pub minimum_stay: u32,
    /// Days shown by `calendar` when `--days` is omitted.
    pub calendar_days: u32,
}

/// Data file locations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot of venues and their bookings.
    pub venues_path: PathBuf,
    /// JSON-lines file receiving reservation requests.
    pub outbox_path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `venuebook.toml` if present) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given
    /// file can not be read, or if the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("VENUEBOOK_VENUES_PATH") {
            self.store.venues_path = val.into();
        }
        if let Some(val) = var("VENUEBOOK_OUTBOX_PATH") {
            self.store.outbox_path = val.into();
        }
        if let Some(nights) = var("VENUEBOOK_MINIMUM_STAY").and_then(|val| val.parse().ok()) {
            self.booking.minimum_stay = nights;
        }
        if let Some(val) = var("VENUEBOOK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.booking.calendar_days == 0 {
            return Err(ConfigError::Validation(
                "calendar_days must be non-zero".to_string(),
            ));
        }
        if self.store.venues_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "venues_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn minimum_stay(&self) -> MinimumStay {
        MinimumStay::nights(self.booking.minimum_stay)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            minimum_stay: 1,
            calendar_days: 30,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            venues_path: PathBuf::from("venues.json"),
            outbox_path: PathBuf::from("reservations.jsonl"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "venuebook=info,venuebook_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
