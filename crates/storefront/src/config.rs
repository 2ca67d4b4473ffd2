//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `GROCEREASE_API_URL` - Base URL of the mock REST store (default: `http://localhost:3001`)
//! - `GROCEREASE_DATA_DIR` - Directory for the local cache (default: `.grocerease`)
//! - `GROCEREASE_TAX_RATE` - Tax added at checkout, as a fraction (default: `0.10`)
//! - `GROCEREASE_CATALOG_TTL_SECS` - How long the product list is cached (default: 300)
//! - `GROCEREASE_INR_RATE` - Rupees per catalog dollar for display (default: 83)

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_DATA_DIR: &str = ".grocerease";
const DEFAULT_TAX_RATE: &str = "0.10";
const DEFAULT_CATALOG_TTL_SECS: &str = "300";
const DEFAULT_INR_RATE: &str = "83";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the REST store
    pub api_url: Url,
    /// Directory holding the local cache slots
    pub data_dir: PathBuf,
    /// Tax rate applied to the cart total at checkout
    pub tax_rate: Decimal,
    /// Time-to-live for the cached product list
    pub catalog_ttl: Duration,
    /// Display conversion rate from catalog dollars to rupees
    pub inr_rate: Decimal,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_url = parse_api_url(&get("GROCEREASE_API_URL", DEFAULT_API_URL))?;
        let data_dir = PathBuf::from(get("GROCEREASE_DATA_DIR", DEFAULT_DATA_DIR));

        let tax_rate = parse_decimal("GROCEREASE_TAX_RATE", &get("GROCEREASE_TAX_RATE", DEFAULT_TAX_RATE))?;
        if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "GROCEREASE_TAX_RATE".to_string(),
                format!("must be between 0 and 1 (got {tax_rate})"),
            ));
        }

        let catalog_ttl = get("GROCEREASE_CATALOG_TTL_SECS", DEFAULT_CATALOG_TTL_SECS)
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GROCEREASE_CATALOG_TTL_SECS".to_string(), e.to_string())
            })?;

        let inr_rate = parse_decimal("GROCEREASE_INR_RATE", &get("GROCEREASE_INR_RATE", DEFAULT_INR_RATE))?;
        if inr_rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "GROCEREASE_INR_RATE".to_string(),
                format!("must be positive (got {inr_rate})"),
            ));
        }

        Ok(Self {
            api_url,
            data_dir,
            tax_rate,
            catalog_ttl,
            inr_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("GROCEREASE_API_URL".to_string(), msg);

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("URL must have a host".to_string()));
    }
    Ok(url)
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
