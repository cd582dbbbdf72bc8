//! Year request parsing and normalization.
//!
//! Payloads come in three shapes, checked in this order:
//! 1. `{"years": [2025, 2026, 2030]}`
//! 2. `{"year": 2026}`
//! 3. `{"start": 2025, "end": 2030}` (inclusive)
//!
//! The shape is resolved once into a [`YearRequest`] and normalization is a
//! pure function of that variant.

use crate::domain::errors::RequestError;
use serde_json::Value;
use std::collections::BTreeSet;

/// Inclusive plausibility bound for requested years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 2000,
            max: 2100,
        }
    }
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&year)
    }

    /// Narrow an in-bounds year; anything else is reported as out of range.
    fn check(&self, year: i64) -> Result<i32, RequestError> {
        if self.contains(year) {
            i32::try_from(year).map_err(|_| self.out_of_range(year))
        } else {
            Err(self.out_of_range(year))
        }
    }

    fn out_of_range(&self, year: i64) -> RequestError {
        RequestError::YearOutOfRange {
            year,
            min: self.min,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearRequest {
    SingleYear(i64),
    YearList(Vec<i64>),
    YearRange { start: i64, end: i64 },
}

impl YearRequest {
    /// Resolve the payload shape. Only the fields of the winning shape are read.
    pub fn from_payload(payload: &Value) -> Result<Self, RequestError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| RequestError::Malformed("Invalid JSON body".to_string()))?;

        if let Some(years) = obj.get("years") {
            let list = years
                .as_array()
                .filter(|list| !list.is_empty())
                .ok_or_else(|| {
                    RequestError::Malformed("'years' must be a non-empty list".to_string())
                })?;
            let years = list
                .iter()
                .map(|v| coerce_year(v, "years"))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(YearRequest::YearList(years));
        }

        if let Some(year) = obj.get("year") {
            return Ok(YearRequest::SingleYear(coerce_year(year, "year")?));
        }

        if let (Some(start), Some(end)) = (obj.get("start"), obj.get("end")) {
            let start = coerce_year(start, "start")?;
            let end = coerce_year(end, "end")?;
            if start > end {
                return Err(RequestError::Malformed(
                    "'start' must be <= 'end'".to_string(),
                ));
            }
            return Ok(YearRequest::YearRange { start, end });
        }

        Err(RequestError::Malformed(
            "Provide 'year', 'years', or ('start' and 'end').".to_string(),
        ))
    }

    /// Sorted, deduplicated years, all inside `bounds`.
    ///
    /// The first offending year in ascending order is reported. Ranges are
    /// checked against the bounds without being expanded.
    pub fn normalize(&self, bounds: &YearBounds) -> Result<BTreeSet<i32>, RequestError> {
        match self {
            YearRequest::SingleYear(year) => Ok(BTreeSet::from([bounds.check(*year)?])),
            YearRequest::YearList(years) => {
                let sorted: BTreeSet<i64> = years.iter().copied().collect();
                sorted.into_iter().map(|year| bounds.check(year)).collect()
            }
            YearRequest::YearRange { start, end } => {
                if start > end {
                    return Err(RequestError::Malformed(
                        "'start' must be <= 'end'".to_string(),
                    ));
                }
                // Lowest year of [start, end] outside the bounds, if any
                let max = i64::from(bounds.max);
                if *start < i64::from(bounds.min) {
                    return Err(bounds.out_of_range(*start));
                }
                if *end > max {
                    return Err(bounds.out_of_range((*start).max(max + 1)));
                }
                let (start, end) = (bounds.check(*start)?, bounds.check(*end)?);
                Ok((start..=end).collect())
            }
        }
    }
}

/// Parse and normalize in one step
pub fn normalize(payload: &Value, bounds: &YearBounds) -> Result<BTreeSet<i32>, RequestError> {
    YearRequest::from_payload(payload)?.normalize(bounds)
}

/// Accept JSON integers, integral floats and numeric strings.
///
/// Any integer is a year here; the bounds check decides whether it is usable.
fn coerce_year(value: &Value, field: &str) -> Result<i64, RequestError> {
    const I64_LIMIT: f64 = 9.2e18;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < I64_LIMIT)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| RequestError::Malformed(format!("'{}' must contain integer years", field)))
}
