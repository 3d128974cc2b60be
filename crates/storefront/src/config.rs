//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TINDI_HOSTNAME` - Hostname the widget is served from. Selects the API
//!   environment (default: empty, which selects development)
//! - `TINDI_API_URL` - Explicit API base URL, overrides hostname selection
//! - `TINDI_CART_DIR` - Directory for the file-backed cart store (default: `.tindi`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Production API base URL.
pub const PRODUCTION_API_URL: &str = "https://api.tinditech.com";

/// Local development API base URL.
pub const DEVELOPMENT_API_URL: &str = "http://127.0.0.1:5000";

/// Hostnames that select the development API.
const LOCAL_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1", ""];

const DEFAULT_CART_DIR: &str = ".tindi";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which API deployment the widget talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEnvironment {
    Production,
    Development,
}

impl ApiEnvironment {
    /// Pick the environment for the hostname the widget is served from.
    ///
    /// Anything other than a loopback or empty hostname is production.
    #[must_use]
    pub fn for_hostname(hostname: &str) -> Self {
        let hostname = hostname.trim().to_ascii_lowercase();
        if LOCAL_HOSTNAMES.contains(&hostname.as_str()) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Base URL of this environment's API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_URL,
            Self::Development => DEVELOPMENT_API_URL,
        }
    }

    /// Name used as the error-tracking environment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Storefront widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Hostname the widget is served from
    pub hostname: String,
    /// Resolved API base URL
    pub api_url: Url,
    /// Directory holding the persisted cart
    pub cart_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TINDI_API_URL` is set but is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TINDI_API_URL` is set but is not a valid URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let hostname = lookup("TINDI_HOSTNAME").unwrap_or_default();

        let api_url = match lookup("TINDI_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_api_url("TINDI_API_URL", &raw)?,
            None => resolve_api_url(&hostname)?,
        };

        let cart_dir = lookup("TINDI_CART_DIR")
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CART_DIR), PathBuf::from);

        Ok(Self {
            hostname,
            api_url,
            cart_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
        })
    }

    /// Configuration for a hostname with no overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the environment's base URL fails to parse.
    pub fn for_hostname(hostname: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            hostname: hostname.to_string(),
            api_url: resolve_api_url(hostname)?,
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            sentry_dsn: None,
        })
    }

    /// Replace the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    /// Environment implied by the configured hostname.
    #[must_use]
    pub fn environment(&self) -> ApiEnvironment {
        ApiEnvironment::for_hostname(&self.hostname)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve the API base URL for a hostname.
///
/// # Errors
///
/// Returns `ConfigError` if the environment's base URL fails to parse.
pub fn resolve_api_url(hostname: &str) -> Result<Url, ConfigError> {
    parse_api_url("TINDI_HOSTNAME", ApiEnvironment::for_hostname(hostname).base_url())
}

fn parse_api_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}
