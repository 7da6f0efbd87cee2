//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_CATALOG` - `stub` (default) or `http`
//! - `VITRINE_API_BASE_URL` - Catalog API base URL (default: `https://seu-backend-java.com/api`)
//! - `VITRINE_API_TOKEN` - Bearer token sent to the catalog API
//! - `VITRINE_STUB_LATENCY_MS` - Artificial delay for stub calls (default: 0)
//! - `VITRINE_CACHE_TTL_SECS` - Catalog cache TTL (default: 300, at most 86400)
//! - `VITRINE_FREE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 1000)
//! - `VITRINE_FLAT_SHIPPING_FEE` - Fee below the threshold (default: 50)
//! - `VITRINE_CURRENCY` - ISO 4217 code for the cart (default: BRL)

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;
use vitrine_core::{CurrencyCode, FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, ShippingPolicy};

const DEFAULT_API_BASE_URL: &str = "https://seu-backend-java.com/api";
const MIN_TOKEN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Longest accepted catalog cache TTL: one day.
pub const MAX_CACHE_TTL_SECS: u64 = crate::catalog::MAX_CACHE_TTL.as_secs();

/// Token values that are clearly copied from a sample `.env`.
const PLACEHOLDER_PATTERNS: &[&str] = &["your-", "changeme", "placeholder", "example", "xxx"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which catalog implementation backs the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogBackend {
    /// Built-in mock data, no network.
    #[default]
    Stub,
    /// Remote catalog API over HTTP.
    Http,
}

impl FromStr for CatalogBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" | "mock" => Ok(Self::Stub),
            "http" => Ok(Self::Http),
            other => Err(format!("expected 'stub' or 'http', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog implementation to use
    pub catalog: CatalogBackend,
    /// Catalog API client settings (used by the `http` backend)
    pub api: ApiConfig,
    /// Artificial latency for the `stub` backend
    pub stub_latency: Duration,
    /// How long catalog responses stay cached
    pub cache_ttl: Duration,
    /// Cart currency
    pub currency: CurrencyCode,
    /// Shipping rules for cart totals
    pub shipping: ShippingPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogBackend::Stub,
            api: ApiConfig::default(),
            stub_latency: Duration::ZERO,
            cache_ttl: crate::catalog::DEFAULT_CACHE_TTL,
            currency: CurrencyCode::BRL,
            shipping: ShippingPolicy::default(),
        }
    }
}

/// Catalog API client configuration.
///
/// Passed explicitly to the HTTP catalog; there is no global client.
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Bearer token for the `Authorization` header
    pub token: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiConfig {
    /// Full URL of an endpoint below the base URL.
    ///
    /// `path` is relative (`products/featured`); the base URL's own path is
    /// kept whether or not it ends with a slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
    }

    /// Value for the `Authorization` header, if a token is configured.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value or the
    /// API token fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a key/value map.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = parse_or_default(&lookup, "VITRINE_CATALOG", CatalogBackend::Stub)?;

        let base_url = match lookup("VITRINE_API_BASE_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| invalid("VITRINE_API_BASE_URL", e))?,
            None => default_base_url(),
        };
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(
                "VITRINE_API_BASE_URL",
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let token = match lookup("VITRINE_API_TOKEN") {
            Some(raw) if !raw.trim().is_empty() => {
                validate_token_strength(&raw, "VITRINE_API_TOKEN")?;
                Some(SecretString::from(raw))
            }
            _ => None,
        };

        let stub_latency_ms: u64 = parse_or_default(&lookup, "VITRINE_STUB_LATENCY_MS", 0)?;
        let cache_ttl_secs: u64 = parse_or_default(&lookup, "VITRINE_CACHE_TTL_SECS", 300)?;
        if cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(invalid(
                "VITRINE_CACHE_TTL_SECS",
                format!("must be at most {MAX_CACHE_TTL_SECS} seconds"),
            ));
        }
        let currency = parse_or_default(&lookup, "VITRINE_CURRENCY", CurrencyCode::BRL)?;

        let threshold = parse_or_default(
            &lookup,
            "VITRINE_FREE_SHIPPING_THRESHOLD",
            FREE_SHIPPING_THRESHOLD,
        )?;
        let flat_fee = parse_or_default(&lookup, "VITRINE_FLAT_SHIPPING_FEE", FLAT_SHIPPING_FEE)?;
        for (key, value) in [
            ("VITRINE_FREE_SHIPPING_THRESHOLD", threshold),
            ("VITRINE_FLAT_SHIPPING_FEE", flat_fee),
        ] {
            if value < Decimal::ZERO {
                return Err(invalid(key, "must not be negative"));
            }
        }

        Ok(Self {
            catalog,
            api: ApiConfig { base_url, token },
            stub_latency: Duration::from_millis(stub_latency_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            currency,
            shipping: ShippingPolicy::new(threshold, flat_fee),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_base_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL is valid")
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse a variable with `FromStr`, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| invalid(key, e)),
        _ => Ok(default),
    }
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // Token length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject tokens that look like sample values or have too little entropy.
fn validate_token_strength(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(token);
    if entropy < MIN_TOKEN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_TOKEN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
