//! HTTP listener configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().context("PORT must be a valid number")?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid HOST:PORT configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerEnvConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let vars = HashMap::from([("PORT", "eighty")]);
        assert!(ServerEnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_err());
    }
}
