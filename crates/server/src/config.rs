//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CUSTOMERS_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `CUSTOMERS_HOST` - Bind address (default: 0.0.0.0)
//! - `CUSTOMERS_PORT` - Listen port (falls back to `PORT`, default: 5000)
//! - `CUSTOMERS_BASE_URL` - URL advertised in the `OpenAPI` document
//!   (default: `http://localhost:<port>`)
//! - `CUSTOMERS_CORS_ORIGINS` - Comma-separated allowed origins (default: `*`)
//! - `CUSTOMERS_DB_MAX_CONNECTIONS` - Pool size limit (default: 10)
//! - `CUSTOMERS_DB_MIN_CONNECTIONS` - Connections kept open (default: 1)
//! - `CUSTOMERS_DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 10)
//! - `CUSTOMERS_RUN_MIGRATIONS` - Apply migrations before serving (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `text` or `json` (default: text)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL advertised in the API documentation
    pub base_url: String,
    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
    /// Apply pending migrations before accepting traffic
    pub run_migrations: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Connection pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env()?;
        let database = DatabaseConfig::from_env()?;
        let host = parse_env("CUSTOMERS_HOST", "0.0.0.0")?;
        let port = match get_optional_env("CUSTOMERS_PORT") {
            Some(_) => parse_env("CUSTOMERS_PORT", "5000")?,
            None => parse_env("PORT", "5000")?,
        };
        let base_url = get_optional_env("CUSTOMERS_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let cors_origins = parse_origins(&get_env_or_default("CUSTOMERS_CORS_ORIGINS", "*"));
        let run_migrations = parse_env("CUSTOMERS_RUN_MIGRATIONS", "false")?;
        let log_format = parse_env("LOG_FORMAT", "text")?;

        Ok(Self {
            database_url,
            database,
            host,
            port,
            base_url,
            cors_origins,
            run_migrations,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_connections: parse_env(
                "CUSTOMERS_DB_MAX_CONNECTIONS",
                &defaults.max_connections.to_string(),
            )?,
            min_connections: parse_env(
                "CUSTOMERS_DB_MIN_CONNECTIONS",
                &defaults.min_connections.to_string(),
            )?,
            acquire_timeout: Duration::from_secs(parse_env(
                "CUSTOMERS_DB_ACQUIRE_TIMEOUT_SECS",
                &defaults.acquire_timeout.as_secs().to_string(),
            )?),
        })
    }
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
///
/// Shared with the CLI, which needs a connection but none of the server
/// settings.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    const PRIMARY_KEY: &str = "CUSTOMERS_DATABASE_URL";

    if let Ok(value) = std::env::var(PRIMARY_KEY) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(PRIMARY_KEY.to_string()))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
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

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
