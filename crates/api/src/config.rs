use std::fmt::Display;
use std::str::FromStr;

use toybox_db::DbConfig;

/// Hostname of the managed database cluster, used unless `DB_HOST` is set.
pub const DEFAULT_DB_HOST: &str = "cluster0.toys.internal";

/// A missing or unparsable environment variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which origins CORS admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database credentials has a default suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` (the default) admits any origin.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Database connection settings.
    pub database: DbConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `5000`                   |
    /// | `CORS_ORIGINS`            | `*`                      |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `DB_USER`                 | required                 |
    /// | `DB_PASS`                 | required                 |
    /// | `DB_HOST`                 | [`DEFAULT_DB_HOST`]      |
    /// | `DB_PORT`                 | `5432`                   |
    /// | `DB_MAX_CONNECTIONS`      | `10`                     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 5000)?;
        let cors_origins = parse_cors_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".into()));
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let database = DbConfig {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()),
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            user: lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            password: lookup("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 10)?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
