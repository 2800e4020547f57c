//! # Storefront Configuration
//!
//! Display, storage and checkout-timing settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TECHSTORE_STORAGE_BACKEND=json_file                                │
//! │     TECHSTORE_STORAGE_PATH=/tmp/techstore.json                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/techstore/storefront.toml (Linux)                        │
//! │     ~/Library/Application Support/com.techstore.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite in the platform data dir, 1500 ms / 3000 ms checkout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "TechStore"
//! currency_symbol = "$"
//! currency_decimals = 0
//!
//! [storage]
//! backend = "sqlite"          # sqlite | json_file | memory
//! path = "/var/lib/techstore/techstore.db"
//! reconcile_with_catalog = true
//!
//! [checkout]
//! processing_delay_ms = 1500
//! confirmation_delay_ms = 3000
//! ```
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use techstore_core::{CheckoutTimings, Money};

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Storage Settings
// =============================================================================

/// Which key-value backend holds the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// `kv_store` table in a SQLite file.
    #[default]
    Sqlite,
    /// One JSON object file.
    JsonFile,
    /// Nothing survives a restart.
    Memory,
}

impl StorageBackend {
    /// True for backends that need a file path.
    pub fn is_file_backed(&self) -> bool {
        !matches!(self, StorageBackend::Memory)
    }

    fn default_file_name(&self) -> Option<&'static str> {
        match self {
            StorageBackend::Sqlite => Some("techstore.db"),
            StorageBackend::JsonFile => Some("techstore.json"),
            StorageBackend::Memory => None,
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::JsonFile => write!(f, "json_file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            "json_file" | "json" | "file" => Ok(StorageBackend::JsonFile),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, json_file, memory",
                other
            ))),
        }
    }
}

/// Where the cart snapshot is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// File for file-backed stores. Defaults to the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Check restored lines against the catalog (drop unknown ids, refresh
    /// names and prices). `false` restores the saved lines verbatim.
    #[serde(default = "default_true")]
    pub reconcile_with_catalog: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: None,
            reconcile_with_catalog: true,
        }
    }
}

impl StorageSettings {
    /// The file the backend should use, or `None` for the memory backend
    /// (or when no platform data dir exists and no path was set).
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let file_name = self.backend.default_file_name()?;

        self.path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "techstore", "storefront")
                .map(|dirs| dirs.data_dir().join(file_name))
        })
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Simulated checkout delays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Processing notice → confirmation.
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,

    /// Confirmation → product grid.
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_ms: u64,
}

fn default_processing_delay() -> u64 {
    1500
}

fn default_confirmation_delay() -> u64 {
    3000
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            processing_delay_ms: default_processing_delay(),
            confirmation_delay_ms: default_confirmation_delay(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shown in the header.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Decimal places shown after whole units (prices carry no fraction).
    #[serde(default)]
    pub currency_decimals: u8,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

fn default_store_name() -> String {
    "TechStore".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: 0,
            storage: StorageSettings::default(),
            checkout: CheckoutSettings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`, or `config_path` if given)
    /// 3. `TECHSTORE_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkout.processing_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "checkout.processing_delay_ms must be greater than 0".into(),
            ));
        }

        if self.checkout.confirmation_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "checkout.confirmation_delay_ms must be greater than 0".into(),
            ));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "currency_decimals must be at most 4".into(),
            ));
        }

        if self.storage.backend.is_file_backed() && self.storage.resolved_path().is_none() {
            return Err(ConfigError::Invalid(format!(
                "storage.path is required for the {} backend",
                self.storage.backend
            )));
        }

        Ok(())
    }

    /// Applies `TECHSTORE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// ## Variables
    /// - `TECHSTORE_STORE_NAME`
    /// - `TECHSTORE_STORAGE_BACKEND`: sqlite | json_file | memory
    /// - `TECHSTORE_STORAGE_PATH`
    /// - `TECHSTORE_RECONCILE_CART`: true | false
    /// - `TECHSTORE_PROCESSING_DELAY_MS`
    /// - `TECHSTORE_CONFIRMATION_DELAY_MS`
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("TECHSTORE_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(backend) = var("TECHSTORE_STORAGE_BACKEND") {
            match backend.parse::<StorageBackend>() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring TECHSTORE_STORAGE_BACKEND"),
            }
        }

        if let Some(path) = var("TECHSTORE_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(flag) = var("TECHSTORE_RECONCILE_CART") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.storage.reconcile_with_catalog = true,
                "0" | "false" | "no" => self.storage.reconcile_with_catalog = false,
                _ => warn!(value = %flag, "Ignoring TECHSTORE_RECONCILE_CART"),
            }
        }

        if let Some(ms) = var("TECHSTORE_PROCESSING_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.checkout.processing_delay_ms = ms;
            }
        }

        if let Some(ms) = var("TECHSTORE_CONFIRMATION_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.checkout.confirmation_delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "techstore", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Checkout delays for the state machine.
    pub fn timings(&self) -> CheckoutTimings {
        CheckoutTimings {
            processing_delay: Duration::from_millis(self.checkout.processing_delay_ms),
            confirmation_delay: Duration::from_millis(self.checkout.confirmation_delay_ms),
        }
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_units(1299)), "$1299");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let units = amount.units();
        let sign = if units < 0 { "-" } else { "" };

        if self.currency_decimals == 0 {
            format!("{}{}{}", sign, self.currency_symbol, units.unsigned_abs())
        } else {
            format!(
                "{}{}{}.{}",
                sign,
                self.currency_symbol,
                units.unsigned_abs(),
                "0".repeat(usize::from(self.currency_decimals))
            )
        }
    }
}
