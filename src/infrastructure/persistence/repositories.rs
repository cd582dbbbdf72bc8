use crate::domain::parking::{ParkingQuery, SEARCH_RADIUS_M, StreetAvailability};
use crate::domain::repositories::ParkingRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

pub struct PgParkingRepository {
    pool: PgPool,
}

impl PgParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingRepository for PgParkingRepository {
    async fn street_availability(&self, query: &ParkingQuery) -> Result<Vec<StreetAvailability>> {
        let rows = match query {
            ParkingQuery::Suburb(suburb) => {
                debug!("Querying parking by suburb {}", suburb);
                sqlx::query(
                    r#"
                    SELECT street,
                           COUNT(*) AS total_spots,
                           COALESCE(SUM(CASE WHEN is_available = true THEN 1 ELSE 0 END), 0) AS available_spots
                    FROM parking_spots
                    WHERE suburb = $1
                    GROUP BY street
                    "#,
                )
                .bind(suburb)
                .fetch_all(&self.pool)
                .await
                .context("Failed to query parking by suburb")?
            }
            ParkingQuery::Radius { lat, lng } => {
                debug!("Querying parking within {}m of ({}, {})", SEARCH_RADIUS_M, lat, lng);
                // PostGIS points are (longitude, latitude)
                sqlx::query(
                    r#"
                    SELECT street,
                           COUNT(*) AS total_spots,
                           COALESCE(SUM(CASE WHEN is_available = true THEN 1 ELSE 0 END), 0) AS available_spots
                    FROM parking_spots
                    WHERE ST_DWithin(
                        geography(ST_MakePoint(longitude, latitude)),
                        geography(ST_MakePoint($1, $2)),
                        $3
                    )
                    GROUP BY street
                    "#,
                )
                .bind(lng)
                .bind(lat)
                .bind(SEARCH_RADIUS_M)
                .fetch_all(&self.pool)
                .await
                .context("Failed to query parking by radius")?
            }
        };

        rows.iter().map(map_row).collect()
    }
}

fn map_row(row: &PgRow) -> Result<StreetAvailability> {
    Ok(StreetAvailability {
        street: row.try_get("street")?,
        total_spots: row.try_get("total_spots")?,
        available_spots: row.try_get("available_spots")?,
    })
}
