use crate::config::DatabaseEnvConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Shared PostgreSQL pool wrapper
#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Build a lazily-connecting pool.
    ///
    /// No connection is opened here; an unreachable database only fails the
    /// requests that need it.
    pub fn connect_lazy(config: &DatabaseEnvConfig) -> Result<Self> {
        let options = connect_options(config)?;
        info!(
            "Database pool configured for {}:{} (max {} connections)",
            options.get_host(),
            options.get_port(),
            config.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(options);

        Ok(Self { pool })
    }
}

/// `DATABASE_URL` when set, otherwise the individual `DB_*` fields
pub fn connect_options(config: &DatabaseEnvConfig) -> Result<PgConnectOptions> {
    if let Some(url) = &config.url {
        return PgConnectOptions::from_str(url).context("Invalid DATABASE_URL");
    }

    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port);
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    if let Some(name) = &config.name {
        options = options.database(name);
    }
    Ok(options)
}
