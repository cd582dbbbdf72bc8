use crate::domain::errors::ParkingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search radius around a coordinate, in metres
pub const SEARCH_RADIUS_M: f64 = 2000.0;

/// Where to look for parking. A suburb wins over coordinates when both are given.
#[derive(Debug, Clone, PartialEq)]
pub enum ParkingQuery {
    Suburb(String),
    Radius { lat: f64, lng: f64 },
}

impl ParkingQuery {
    pub fn from_payload(payload: &Value) -> Result<Self, ParkingError> {
        let suburb = payload
            .get("suburb")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(suburb) = suburb {
            return Ok(ParkingQuery::Suburb(suburb.to_string()));
        }

        let lat = payload.get("lat").and_then(Value::as_f64);
        let lng = payload.get("lng").and_then(Value::as_f64);
        match (lat, lng) {
            (Some(lat), Some(lng)) => Ok(ParkingQuery::Radius { lat, lng }),
            _ => Err(ParkingError::MissingLocation),
        }
    }
}

/// Spot counts for one street
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAvailability {
    pub street: String,
    pub total_spots: i64,
    pub available_spots: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkingSummary {
    pub total_spots: i64,
    pub available_spots: i64,
    pub distribution: Vec<StreetAvailability>,
}

impl ParkingSummary {
    pub fn from_distribution(distribution: Vec<StreetAvailability>) -> Self {
        let total_spots = distribution.iter().map(|s| s.total_spots).sum();
        let available_spots = distribution.iter().map(|s| s.available_spots).sum();
        Self {
            total_spots,
            available_spots,
            distribution,
        }
    }
}
