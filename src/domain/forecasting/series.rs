use crate::domain::errors::PipelineError;
use serde::{Deserialize, Serialize};

/// One calendar-year observation of a scalar (population in practice)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

impl Observation {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Yearly series, strictly ascending by year with no duplicates.
///
/// The ordering is checked on construction so the fitting and validation
/// code can index into it without re-sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    points: Vec<Observation>,
}

impl HistoricalSeries {
    pub fn new(points: Vec<Observation>) -> Result<Self, PipelineError> {
        for pair in points.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(PipelineError::Fitting {
                    reason: format!(
                        "series must be strictly ascending by year ({} followed by {})",
                        pair[0].year, pair[1].year
                    ),
                });
            }
        }
        if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(PipelineError::Fitting {
                reason: format!("non-finite value for year {}", bad.year),
            });
        }
        Ok(Self { points })
    }

    /// Build from (year, value) pairs in any order. Duplicate years are rejected.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut points: Vec<Observation> = pairs
            .into_iter()
            .map(|(year, value)| Observation::new(year, value))
            .collect();
        points.sort_by_key(|p| p.year);
        Self::new(points)
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first `n` observations (the "past" as seen from index `n`).
    pub fn head(&self, n: usize) -> HistoricalSeries {
        let n = n.min(self.points.len());
        HistoricalSeries {
            points: self.points[..n].to_vec(),
        }
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }
}
