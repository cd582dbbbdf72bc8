use crate::domain::errors::ModelError;
use crate::domain::forecasting::{TrendModel, ValidationSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk form of a trained population trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub region: String,
    pub trained_at: DateTime<Utc>,
    pub model: TrendModel,
    pub validation: Option<ValidationSummary>,
}

impl ModelArtifact {
    pub fn new(region: impl Into<String>, model: TrendModel) -> Self {
        Self {
            region: region.into(),
            trained_at: Utc::now(),
            model,
            validation: None,
        }
    }

    pub fn with_validation(mut self, summary: ValidationSummary) -> Self {
        self.validation = Some(summary);
        self
    }
}

/// Ordered list of places the model artifact may live.
///
/// Candidates are tried front to back; the first existing file wins.
#[derive(Debug, Clone)]
pub struct ModelStore {
    candidates: Vec<PathBuf>,
}

impl ModelStore {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// `<base>/<file>`, `<base>/model/<file>`, `<base>/models/<file>`,
    /// preceded by `explicit` when given.
    pub fn with_defaults(explicit: Option<PathBuf>, base: &Path, file_name: &str) -> Self {
        let mut candidates: Vec<PathBuf> = explicit.into_iter().collect();
        candidates.push(base.join(file_name));
        candidates.push(base.join("model").join(file_name));
        candidates.push(base.join("models").join(file_name));
        Self::new(candidates)
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn resolve(&self) -> Result<PathBuf, ModelError> {
        self.candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| ModelError::NotFound {
                tried: self.candidates.clone(),
            })
    }

    pub fn load(&self) -> Result<(PathBuf, ModelArtifact), ModelError> {
        let path = self.resolve()?;
        info!("Loading model: {:?}", path);
        let artifact = read_artifact(&path)?;
        Ok((path, artifact))
    }
}

pub fn read_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ModelError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the artifact, creating parent directories as needed
pub fn save_artifact(path: &Path, artifact: &ModelArtifact) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create model directory")?;
    }

    let content =
        serde_json::to_string_pretty(artifact).context("Failed to serialize model artifact")?;

    // Atomic write: write to temp file then rename
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).context("Failed to write temp model file")?;
    fs::rename(&temp_path, path).context("Failed to rename model file")?;

    info!("Saved model to {:?}", path);
    Ok(())
}
