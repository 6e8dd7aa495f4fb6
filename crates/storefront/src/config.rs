//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_COUNTRY` - Country context for cart queries (default: US)
//! - `STOREFRONT_LANGUAGE` - Language context for cart queries (default: EN)
//! - `STOREFRONT_CART_TIMEOUT_MS` - Budget for the layout's cart fetch (default: 3000)
//! - `STOREFRONT_PRODUCT_CACHE_TTL_SECS` - Product cache lifetime (default: 300)
//! - `STOREFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Country and language context
    pub i18n: I18n,
    /// How long the layout waits for the cart before rendering a placeholder
    pub cart_timeout: Duration,
    /// Product cache lifetime
    pub product_cache_ttl: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .finish()
    }
}

impl ShopifyStorefrontConfig {
    /// Storefront API GraphQL endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store, self.api_version
        )
    }
}

/// Country and language the storefront sells in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18n {
    /// ISO 3166-1 alpha-2 country code (e.g., "US")
    pub country: String,
    /// Storefront API language code (e.g., "EN", "PT_BR")
    pub language: String,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            language: "EN".to_string(),
        }
    }
}

impl I18n {
    /// Build from raw codes, normalizing to upper case.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the country is not two letters
    /// or the language contains anything besides letters and underscores.
    pub fn new(country: &str, language: &str) -> Result<Self, ConfigError> {
        let country = country.trim().to_ascii_uppercase();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_COUNTRY".to_string(),
                format!("'{country}' is not a two-letter country code"),
            ));
        }

        let language = language.trim().to_ascii_uppercase();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_LANGUAGE".to_string(),
                format!("'{language}' is not a language code"),
            ));
        }

        Ok(Self { country, language })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host: IpAddr = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port: u16 = parse_env_or_default("STOREFRONT_PORT", "3000")?;
        let base_url: Url = get_required_env("STOREFRONT_BASE_URL")?
            .parse()
            .map_err(|e: url::ParseError| {
                ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
            })?;
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));
        let i18n = I18n::new(
            &get_env_or_default("STOREFRONT_COUNTRY", "US"),
            &get_env_or_default("STOREFRONT_LANGUAGE", "EN"),
        )?;
        let cart_timeout = Duration::from_millis(parse_env_or_default(
            "STOREFRONT_CART_TIMEOUT_MS",
            "3000",
        )?);
        let product_cache_ttl = Duration::from_secs(parse_env_or_default(
            "STOREFRONT_PRODUCT_CACHE_TTL_SECS",
            "300",
        )?);
        let log_format: LogFormat = parse_env_or_default("STOREFRONT_LOG_FORMAT", "pretty")?;

        let shopify = ShopifyStorefrontConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            i18n,
            cart_timeout,
            product_cache_ttl,
            log_format,
            shopify,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (cookies get `Secure`).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2026-01"),
            storefront_private_token: get_validated_secret("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens are random hex or base62
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the Headless channel settings."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
