//! Repository Pattern Abstractions
//!
//! Storage-facing traits used by the application services. The PostgreSQL
//! implementation lives in `infrastructure::persistence`, the in-memory one
//! in `infrastructure::repositories`.

use crate::domain::parking::{ParkingQuery, StreetAvailability};
use anyhow::Result;
use async_trait::async_trait;

/// Read access to parking spot availability, grouped by street
#[async_trait]
pub trait ParkingRepository: Send + Sync {
    /// Per-street spot counts for every street matching the query
    async fn street_availability(&self, query: &ParkingQuery) -> Result<Vec<StreetAvailability>>;
}
