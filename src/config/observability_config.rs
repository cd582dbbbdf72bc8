//! Observability configuration parsing from environment variables.

use std::env;

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            metrics_enabled: lookup("METRICS_ENABLED")
                .unwrap_or_else(|| "true".to_string())
                .parse::<bool>()
                .unwrap_or(true),
        }
    }
}
