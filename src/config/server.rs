//! Runtime server configuration, read from the environment.

use std::num::ParseIntError;

use thiserror::Error;

use crate::server::cors::AllowedOrigins;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Host used when `HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Origins used when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "https://vidochat.neocities.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
}

impl ServerConfig {
    /// Load `HOST`, `PORT` and `ALLOWED_ORIGINS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let host = lookup("HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let allowed_origins = AllowedOrigins::from_csv(
            &lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );
        Ok(Self {
            host,
            port,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.allowed_origins.is_allowed("https://vidochat.neocities.org"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(env(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("ALLOWED_ORIGINS", "http://localhost:5173, https://example.org"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.allowed_origins.is_allowed("https://example.org"));
        assert!(!config.allowed_origins.is_allowed("https://vidochat.neocities.org"));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(env(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
    }
}
