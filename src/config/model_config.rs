//! Model artifact location and request bounds.

use crate::domain::request::YearBounds;
use crate::infrastructure::model_store::ModelStore;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    /// Explicit artifact path, tried before the default locations
    pub model_path: Option<PathBuf>,
    pub model_dir: PathBuf,
    pub model_file: String,
    pub year_min: i32,
    pub year_max: i32,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_dir: PathBuf::from("."),
            model_file: "linear_VIC.json".to_string(),
            year_min: 2000,
            year_max: 2100,
        }
    }
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let year_min = Self::parse_i32(&lookup, "YEAR_MIN", defaults.year_min)?;
        let year_max = Self::parse_i32(&lookup, "YEAR_MAX", defaults.year_max)?;
        if year_min > year_max {
            anyhow::bail!(
                "YEAR_MIN ({}) must not exceed YEAR_MAX ({})",
                year_min,
                year_max
            );
        }

        Ok(Self {
            model_path: lookup("MODEL_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            model_dir: lookup("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            model_file: lookup("MODEL_FILE").unwrap_or(defaults.model_file),
            year_min,
            year_max,
        })
    }

    pub fn year_bounds(&self) -> YearBounds {
        YearBounds::new(self.year_min, self.year_max)
    }

    pub fn model_store(&self) -> ModelStore {
        ModelStore::with_defaults(self.model_path.clone(), &self.model_dir, &self.model_file)
    }

    fn parse_i32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: i32) -> Result<i32> {
        lookup(key)
            .unwrap_or_else(|| default.to_string())
            .parse::<i32>()
            .context(format!("Failed to parse {}", key))
    }
}
