//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `3000` |
//! | `SCHOOL_BIND_HOST` | `0.0.0.0` |
//! | `SCHOOL_DB_PATH` | `school_management.sqlite3` (`:memory:` for in-memory) |
//! | `SCHOOL_LOG_LEVEL` | `debug` in debug builds, `info` in release |
//! | `SCHOOL_LOG_DIR` | unset: log to stderr only |

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "school_management.sqlite3";
const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseLocation,
    pub log_level: String,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidHost(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(raw) => write!(f, "PORT must be an integer in 1..=65535, got `{raw}`"),
            Self::InvalidHost(raw) => write!(f, "SCHOOL_BIND_HOST must be an IP address, got `{raw}`"),
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = match get("SCHOOL_BIND_HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let database = match get("SCHOOL_DB_PATH").as_deref() {
            Some(IN_MEMORY_DB) => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        };

        Ok(Self {
            host,
            port,
            database,
            log_level: get("SCHOOL_LOG_LEVEL")
                .unwrap_or_else(|| school_core::default_log_level().to_string()),
            log_dir: get("SCHOOL_LOG_DIR"),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DatabaseLocation, ServerConfig, DEFAULT_DB_PATH};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from(DEFAULT_DB_PATH))
        );
        assert_eq!(config.log_level, school_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SCHOOL_BIND_HOST", "127.0.0.1"),
            ("SCHOOL_DB_PATH", ":memory:"),
            ("SCHOOL_LOG_LEVEL", "warn"),
            ("SCHOOL_LOG_DIR", "/var/log/schools"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/schools"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("PORT", "  "), ("SCHOOL_LOG_DIR", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            config_from(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert_eq!(
            config_from(&[("PORT", "0")]).unwrap_err(),
            ConfigError::InvalidPort("0".to_string())
        );
        assert!(matches!(
            config_from(&[("SCHOOL_BIND_HOST", "localhost")]),
            Err(ConfigError::InvalidHost(_))
        ));
    }
}
