//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Business rule defaults.
    #[serde(default)]
    pub business: BusinessConfig,
    /// Pagination defaults.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Business rule defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// VAT rate in percent applied to (subtotal + labor cost).
    #[serde(default = "default_vat_rate_percent")]
    pub vat_rate_percent: Decimal,
    /// Hourly labor rate used when a document does not specify one.
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: Decimal,
    /// Maximum retries when a freshly allocated number collides.
    #[serde(default = "default_allocation_attempts")]
    pub allocation_attempts: u32,
}

fn default_vat_rate_percent() -> Decimal {
    Decimal::from(21)
}

fn default_hourly_rate() -> Decimal {
    Decimal::from(50)
}

fn default_allocation_attempts() -> u32 {
    5
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            vat_rate_percent: default_vat_rate_percent(),
            default_hourly_rate: default_hourly_rate(),
            allocation_attempts: default_allocation_attempts(),
        }
    }
}

/// Pagination defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Default page size for list operations.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    20
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("OPSDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
