//! Configuration module for Motorcast.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: Server, Model, Database, and Observability.

mod database_config;
mod model_config;
mod observability_config;
mod server_config;

pub use database_config::DatabaseEnvConfig;
pub use model_config::ModelEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub model: ModelEnvConfig,
    pub database: DatabaseEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerEnvConfig::from_env().context("Failed to load server config")?,
            model: ModelEnvConfig::from_env().context("Failed to load model config")?,
            database: DatabaseEnvConfig::from_env().context("Failed to load database config")?,
            observability: ObservabilityEnvConfig::from_env(),
        })
    }
}
