//! Server configuration read from the environment.

use std::time::Duration;

use catalog_products::domain::links::BaseUrl;
use thiserror::Error;

/// A configuration value is missing or malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("{key} is invalid: {reason}")]
    Invalid {
        /// The offending variable.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Public base URL used when a request carries no host information.
    pub public_base_url: BaseUrl,
    /// Whether the email channel is enabled.
    pub email_enabled: bool,
    /// Whether the SMS channel is enabled.
    pub sms_enabled: bool,
    /// Sender address of stock alert emails.
    pub notify_from_email: String,
    /// Upper bound on handling a single request.
    pub request_timeout: Duration,
    /// Connection pool size.
    pub db_max_connections: u32,
    /// Upper bound on waiting for a pooled connection.
    pub db_acquire_timeout: Duration,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or any
    /// variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or any
    /// variable is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(get("PORT"), "PORT", 3000)?;

        let api_scheme = get("API_SCHEME").unwrap_or_else(|| "http".to_string());
        let api_host = get("API_HOST").ok_or(ConfigError::Missing("API_HOST"))?;
        let public_base_url =
            BaseUrl::from_parts(&api_scheme, &api_host).map_err(|e| ConfigError::Invalid {
                key: "API_HOST",
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            public_base_url,
            email_enabled: flag(get("EMAIL_PROVIDER")),
            sms_enabled: flag(get("SMS_PROVIDER")),
            notify_from_email: get("NOTIFY_FROM_EMAIL")
                .unwrap_or_else(|| "stock@catalog.local".to_string()),
            request_timeout: Duration::from_secs(parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                10,
            )?),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn flag(value: Option<String>) -> bool {
    value.is_some_and(|v| v == "true" || v == "1")
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
