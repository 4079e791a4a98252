//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `FURNICRAFT_HOST` - Bind address (default: 127.0.0.1)
//! - `FURNICRAFT_PORT` - Listen port (default: 3000)
//! - `FURNICRAFT_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `FURNICRAFT_MOCK_LATENCY_PERCENT` - Scale for the mock data layer's
//!   artificial delays, `0` disables them (default: 100)
//! - `FURNICRAFT_SESSION_IDLE_MINUTES` - Session inactivity expiry (default: 120)
//! - `FURNICRAFT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Upper bound for the latency scale.
const MAX_LATENCY_PERCENT: u32 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Percentage applied to the mock data layer's delays
    pub mock_latency_percent: u32,
    /// Minutes of inactivity before a session expires
    pub session_idle_minutes: i64,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. `production`)
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            mock_latency_percent: 100,
            session_idle_minutes: 120,
            static_dir: PathBuf::from("crates/storefront/static"),
            sentry_dsn: None,
            sentry_environment: None,
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
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("FURNICRAFT_HOST", "127.0.0.1")?;
        let port = parse_env("FURNICRAFT_PORT", "3000")?;

        let base_url = get_env_or_default("FURNICRAFT_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FURNICRAFT_BASE_URL".to_string(), e.to_string())
        })?;

        let mock_latency_percent: u32 = parse_env("FURNICRAFT_MOCK_LATENCY_PERCENT", "100")?;
        if mock_latency_percent > MAX_LATENCY_PERCENT {
            return Err(ConfigError::InvalidEnvVar(
                "FURNICRAFT_MOCK_LATENCY_PERCENT".to_string(),
                format!("must be at most {MAX_LATENCY_PERCENT}"),
            ));
        }

        let session_idle_minutes: i64 = parse_env("FURNICRAFT_SESSION_IDLE_MINUTES", "120")?;
        if session_idle_minutes <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FURNICRAFT_SESSION_IDLE_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }

        let static_dir = PathBuf::from(get_env_or_default(
            "FURNICRAFT_STATIC_DIR",
            "crates/storefront/static",
        ));

        Ok(Self {
            host,
            port,
            base_url,
            mock_latency_percent,
            session_idle_minutes,
            static_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
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
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure_follows_scheme() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());
        config.base_url = "https://furnicraft.example".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_value_trims() {
        let port: u16 = parse_value("FURNICRAFT_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("FURNICRAFT_PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FURNICRAFT_PORT"));
    }

    #[test]
    fn test_parse_value_rejects_bad_host() {
        assert!(parse_value::<IpAddr>("FURNICRAFT_HOST", "localhost:3000").is_err());
    }
}
