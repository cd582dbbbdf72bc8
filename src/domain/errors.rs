use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a request payload into a set of years.
/// Both variants are client faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0}")]
    Malformed(String),

    #[error("Year out of range: {year} (allowed {min}..={max})")]
    YearOutOfRange { year: i64, min: i32, max: i32 },
}

/// Errors related to locating and decoding the persisted trend model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model not found. Tried: {}", format_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("Failed to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode model artifact {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Faults of the offline fitting / validation / ratio pipeline.
/// These come from degenerate historical data, never from user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Fitting failed: {reason}")]
    Fitting { reason: String },

    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Ratio estimation failed: {reason}")]
    Ratio { reason: String },
}

/// Everything that can go wrong on the forecast request path
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ForecastError {
    /// Client faults map to a 400-class response, the rest to a server fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ForecastError::Request(_))
    }
}

/// Errors related to the parking availability lookup
#[derive(Debug, Error)]
pub enum ParkingError {
    #[error("Missing location data")]
    MissingLocation,

    #[error("Database query failed: {0}")]
    Database(String),
}

impl ParkingError {
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ParkingError::MissingLocation)
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_out_of_range_formatting() {
        let err = RequestError::YearOutOfRange {
            year: 2101,
            min: 2000,
            max: 2100,
        };

        let msg = err.to_string();
        assert!(msg.contains("2101"));
        assert!(msg.contains("2000..=2100"));
    }

    #[test]
    fn test_model_not_found_lists_every_candidate() {
        let err = ModelError::NotFound {
            tried: vec![
                PathBuf::from("linear_VIC.json"),
                PathBuf::from("models/linear_VIC.json"),
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("linear_VIC.json"));
        assert!(msg.contains("models/linear_VIC.json"));
    }

    #[test]
    fn test_fault_classification() {
        let client: ForecastError = RequestError::Malformed("bad".to_string()).into();
        let server: ForecastError = PipelineError::Ratio {
            reason: "bad".to_string(),
        }
        .into();

        assert!(client.is_client_fault());
        assert!(!server.is_client_fault());
        assert!(ParkingError::MissingLocation.is_client_fault());
        assert!(!ParkingError::Database("down".to_string()).is_client_fault());
    }
}
