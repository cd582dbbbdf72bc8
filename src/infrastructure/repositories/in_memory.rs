//! In-Memory Repository Implementations
//!
//! Thread-safe, in-memory implementations of the repository traits defined
//! in `domain::repositories`. Used by tests in place of PostgreSQL.

use crate::domain::parking::{ParkingQuery, SEARCH_RADIUS_M, StreetAvailability};
use crate::domain::repositories::ParkingRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const EARTH_RADIUS_M: f64 = 6_371_008.8;

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingSpot {
    pub street: String,
    pub suburb: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_available: bool,
}

/// In-memory implementation of ParkingRepository
pub struct InMemoryParkingRepository {
    spots: Arc<RwLock<Vec<ParkingSpot>>>,
}

impl InMemoryParkingRepository {
    pub fn new() -> Self {
        Self::with_spots(Vec::new())
    }

    pub fn with_spots(spots: Vec<ParkingSpot>) -> Self {
        Self {
            spots: Arc::new(RwLock::new(spots)),
        }
    }
}

impl Default for InMemoryParkingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParkingRepository for InMemoryParkingRepository {
    async fn street_availability(&self, query: &ParkingQuery) -> Result<Vec<StreetAvailability>> {
        let spots = self.spots.read().await;
        let mut by_street: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

        for spot in spots.iter() {
            let matches = match query {
                ParkingQuery::Suburb(suburb) => spot.suburb == *suburb,
                ParkingQuery::Radius { lat, lng } => {
                    haversine_m(*lat, *lng, spot.latitude, spot.longitude) <= SEARCH_RADIUS_M
                }
            };
            if matches {
                let entry = by_street.entry(spot.street.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if spot.is_available {
                    entry.1 += 1;
                }
            }
        }

        Ok(by_street
            .into_iter()
            .map(|(street, (total, available))| StreetAvailability {
                street: street.to_string(),
                total_spots: total,
                available_spots: available,
            })
            .collect())
    }
}

/// Great-circle distance in metres
fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(street: &str, suburb: &str, lat: f64, lng: f64, free: bool) -> ParkingSpot {
        ParkingSpot {
            street: street.to_string(),
            suburb: suburb.to_string(),
            latitude: lat,
            longitude: lng,
            is_available: free,
        }
    }

    fn repo() -> InMemoryParkingRepository {
        InMemoryParkingRepository::with_spots(vec![
            spot("Lygon St", "Carlton", -37.7980, 144.9670, true),
            spot("Lygon St", "Carlton", -37.7981, 144.9671, false),
            spot("Swanston St", "Melbourne", -37.8136, 144.9631, true),
            // Geelong, ~65km away
            spot("Moorabool St", "Geelong", -38.1499, 144.3617, true),
        ])
    }

    #[tokio::test]
    async fn test_suburb_groups_by_street() {
        let rows = repo()
            .street_availability(&ParkingQuery::Suburb("Carlton".to_string()))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![StreetAvailability {
                street: "Lygon St".to_string(),
                total_spots: 2,
                available_spots: 1,
            }]
        );
    }

    #[tokio::test]
    async fn test_radius_excludes_far_spots() {
        let rows = repo()
            .street_availability(&ParkingQuery::Radius {
                lat: -37.8060,
                lng: 144.9650,
            })
            .await
            .unwrap();
        let streets: Vec<&str> = rows.iter().map(|r| r.street.as_str()).collect();
        assert_eq!(streets, vec!["Lygon St", "Swanston St"]);
    }

    #[test]
    fn test_haversine_known_distance() {
        // One degree of latitude is ~111.2km
        let d = haversine_m(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 100.0);
    }
}
