//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tally_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Bind address
    pub host: IpAddr,

    /// Bind port
    pub port: u16,

    /// SQLite database file, or `:memory:`
    pub database_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// How long a request waits for a pooled connection
    pub db_acquire_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Missing keys take the
    /// default; present keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let acquire_secs: u64 = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?;

        let config = ApiConfig {
            host: parse_or(&lookup, "API_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "API_PORT", 5000)?,
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./tally.db".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to bind the listener to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = if self.database_path == ":memory:" {
            // a single in-memory connection; more would each see an empty database
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
        };

        config.connect_timeout(self.db_acquire_timeout)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_address().to_string(), "0.0.0.0:5000");
        assert_eq!(config.database_path, "./tally.db");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("DATABASE_PATH", ":memory:"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_address().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 4);

        let db = config.db_config();
        assert!(db.is_in_memory());
        assert_eq!(db.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("API_PORT", "not-a-port")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for API_PORT");

        assert!(config_from(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config_from(&[("API_HOST", "localhost:80")]).is_err());
    }
}
