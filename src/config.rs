//! Runtime configuration.
//!
//! Values come from environment variables prefixed with `TIMEBANK_`. Unset
//! variables fall back to [`TimeBankConfig::default`].
//!
//! # Examples
//!
//! ```
//! use timebank::config::TimeBankConfig;
//!
//! let config = TimeBankConfig::from_lookup(|key| match key {
//!     "TIMEBANK_SEARCH_LIMIT" => Some("20".to_owned()),
//!     _ => None,
//! })
//! .expect("valid configuration");
//! assert_eq!(config.search_limit, 20);
//! assert_eq!(config.pool_max_size, 10);
//! ```

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TIMEBANK_DATABASE_URL";
/// Environment variable for the maximum pool size.
pub const POOL_MAX_SIZE_VAR: &str = "TIMEBANK_POOL_MAX_SIZE";
/// Environment variable for the pool checkout timeout in seconds.
pub const POOL_TIMEOUT_SECS_VAR: &str = "TIMEBANK_POOL_TIMEOUT_SECS";
/// Environment variable for the skill search result limit.
pub const SEARCH_LIMIT_VAR: &str = "TIMEBANK_SEARCH_LIMIT";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value as supplied.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Runtime configuration for services and adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBankConfig {
    /// `PostgreSQL` connection URL; only required by the Diesel adapters.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_max_size: u32,
    /// How long a caller waits for a pooled connection.
    pub pool_timeout: Duration,
    /// Maximum number of skills returned by a search.
    pub search_limit: usize,
}

impl Default for TimeBankConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_max_size: 10,
            pool_timeout: Duration::from_secs(30),
            search_limit: 50,
        }
    }
}

impl TimeBankConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed or
    /// a numeric limit is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        let pool_max_size =
            parse_positive(&lookup, POOL_MAX_SIZE_VAR)?.unwrap_or(defaults.pool_max_size);
        let pool_timeout = parse_positive::<u64>(&lookup, POOL_TIMEOUT_SECS_VAR)?
            .map_or(defaults.pool_timeout, Duration::from_secs);
        let search_limit =
            parse_positive(&lookup, SEARCH_LIMIT_VAR)?.unwrap_or(defaults.search_limit);

        Ok(Self {
            database_url,
            pool_max_size,
            pool_timeout,
            search_limit,
        })
    }

    /// Returns the configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no URL is configured.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))
    }
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: err.to_string(),
    })?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(Some(value))
}
