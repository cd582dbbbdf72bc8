//! Database connection parameters.
//!
//! `DATABASE_URL` wins when set; otherwise the individual `DB_*` variables
//! are used.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct DatabaseEnvConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseEnvConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: None,
            password: None,
            name: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match non_empty("DB_PORT") {
            Some(raw) => raw.parse::<u16>().context("Failed to parse DB_PORT")?,
            None => defaults.port,
        };
        let max_connections = match non_empty("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("Failed to parse DB_MAX_CONNECTIONS")?,
            None => defaults.max_connections,
        };

        Ok(Self {
            url: non_empty("DATABASE_URL"),
            host: non_empty("DB_HOST").unwrap_or(defaults.host),
            port,
            user: non_empty("DB_USER"),
            password: non_empty("DB_PASSWORD"),
            name: non_empty("DB_NAME"),
            max_connections,
            acquire_timeout_secs: defaults.acquire_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseEnvConfig::from_lookup(|_| None).unwrap();
        assert!(config.url.is_none());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_individual_variables() {
        let vars = HashMap::from([
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "parking"),
            ("DB_PASSWORD", ""),
            ("DB_NAME", "spots"),
        ]);
        let config =
            DatabaseEnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user.as_deref(), Some("parking"));
        assert!(config.password.is_none());
        assert_eq!(config.name.as_deref(), Some("spots"));
    }
}
