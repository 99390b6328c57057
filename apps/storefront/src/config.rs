//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOREFRONT_API_URL=http://api.local:3333                            │
//! │     STOREFRONT_CART_KEY=@shop:cart                                      │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)             │
//! │     ~/.config/storefront/storefront.toml (Linux)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:3333, key "@storefront:cart"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! path = "/var/lib/storefront/storefront.db"
//! cart_key = "@storefront:cart"
//!
//! [cart]
//! serialize_operations = false
//!
//! [currency]
//! symbol = "$"
//! decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use storefront_catalog::CatalogConfig;
use storefront_core::DEFAULT_CART_KEY;
use storefront_storage::StorageConfig;

use crate::error::{AppError, AppResult};
use crate::state::CartOptions;

// =============================================================================
// API Settings
// =============================================================================

/// Where product and stock lookups go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds). Unset waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart blob lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Unset means `storefront.db` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: None,
            cart_key: default_cart_key(),
        }
    }
}

// =============================================================================
// Cart & Currency Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSettings {
    /// Run overlapping cart operations one at a time.
    #[serde(default)]
    pub serialize_operations: bool,
}

/// Price formatting for the listing and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimals() -> u8 {
    2
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}

impl CurrencySettings {
    /// Formats a price given in hundredths, rescaled to `decimals` places.
    ///
    /// Dropped digits round half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_lib::config::CurrencySettings;
    ///
    /// let currency = CurrencySettings::default();
    /// assert_eq!(currency.format(17990), "$179.90");
    ///
    /// let yen = CurrencySettings { symbol: "¥".into(), decimals: 0 };
    /// assert_eq!(yen.format(17990), "¥180");
    /// ```
    pub fn format(&self, cents: i64) -> String {
        let decimals = self.decimals.min(MAX_CURRENCY_DECIMALS) as u32;
        let minor = rescale_cents(cents, decimals);

        let divisor = 10_i64.pow(decimals);
        let whole = (minor / divisor).unsigned_abs();
        let frac = (minor % divisor).unsigned_abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

/// Largest `currency.decimals` accepted by validation.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Converts hundredths into units of `10^-decimals`.
fn rescale_cents(cents: i64, decimals: u32) -> i64 {
    if decimals >= 2 {
        return cents.saturating_mul(10_i64.pow(decimals - 2));
    }

    let divisor = 10_i64.pow(2 - decimals);
    let half = if cents < 0 { -divisor / 2 } else { divisor / 2 };
    cents.saturating_add(half) / divisor
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete configuration for the storefront.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub currency: CurrencySettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// Falls back to the platform config dir when `config_path` is `None`.
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| AppError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigLoadFailed(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            AppError::InvalidConfig(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::InvalidConfig(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.storage.cart_key.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "storage.cart_key must not be empty".into(),
            ));
        }

        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(AppError::InvalidConfig(format!(
                "currency.decimals must be at most {}, got: {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            debug!(base_url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("STOREFRONT_API_TIMEOUT") {
            match timeout.parse() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Invalid STOREFRONT_API_TIMEOUT, ignoring"),
            }
        }

        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("STOREFRONT_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(flag) = lookup("STOREFRONT_SERIALIZE_OPERATIONS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.serialize_operations = true,
                "0" | "false" | "no" | "off" => self.cart.serialize_operations = false,
                other => warn!(value = %other, "Invalid STOREFRONT_SERIALIZE_OPERATIONS, ignoring"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Resolves the SQLite file path, creating the data dir when defaulted.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("com", "storefront", "storefront").ok_or_else(
            || AppError::InvalidConfig("Could not determine app data directory".into()),
        )?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| AppError::InvalidConfig(format!("{}: {}", data_dir.display(), e)))?;

        Ok(data_dir.join("storefront.db"))
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::new(self.api.base_url.clone());
        match self.api.timeout_secs {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub fn storage_config(&self) -> AppResult<StorageConfig> {
        Ok(StorageConfig::new(self.database_path()?))
    }

    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            cart_key: self.storage.cart_key.clone(),
            serialize_operations: self.cart.serialize_operations,
        }
    }
}
