//! Station directory repository implementation

use sqlx::PgPool;
use crate::models::station::StationRecord;
use crate::models::transport::TransportMode;
use crate::utils::errors::TransitBuddyError;

/// Insert payload for a directory reload
#[derive(Debug, Clone)]
pub struct NewStation {
    pub title: String,
    pub code: String,
    pub transport_type: String,
}

#[derive(Debug, Clone)]
pub struct StationRepository {
    pool: PgPool,
}

impl StationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the directory holds a station with exactly this title,
    /// optionally restricted to a transport mode. Exact, case-sensitive match.
    pub async fn exists(
        &self,
        title: &str,
        mode: Option<TransportMode>,
    ) -> Result<bool, TransitBuddyError> {
        let Some(mode) = mode else {
            return Ok(self.find_by_title(title).await?.is_some());
        };

        let found: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM stations WHERE title = $1 AND transport_type = $2 LIMIT 1"
        )
        .bind(title)
        .bind(mode.code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// Resolve the directory code for a station title + transport mode
    pub async fn find_code(
        &self,
        title: &str,
        mode: TransportMode,
    ) -> Result<Option<String>, TransitBuddyError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT code FROM stations WHERE title = $1 AND transport_type = $2 LIMIT 1"
        )
        .bind(title)
        .bind(mode.code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(code,)| code))
    }

    /// Find a station row by title
    pub async fn find_by_title(
        &self,
        title: &str,
    ) -> Result<Option<StationRecord>, TransitBuddyError> {
        let station = sqlx::query_as::<_, StationRecord>(
            "SELECT id, title, code, transport_type FROM stations WHERE title = $1 LIMIT 1"
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(station)
    }

    /// Replace the whole directory in one transaction.
    ///
    /// The old table contents are only discarded once the new set is ready,
    /// so a failed reload leaves the previous directory in place.
    pub async fn replace_all(&self, stations: &[NewStation]) -> Result<u64, TransitBuddyError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stations").execute(&mut *tx).await?;

        let mut inserted = 0u64;
        for station in stations {
            sqlx::query(
                "INSERT INTO stations (title, code, transport_type) VALUES ($1, $2, $3)"
            )
            .bind(&station.title)
            .bind(&station.code)
            .bind(&station.transport_type)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Directory size
    pub async fn count(&self) -> Result<i64, TransitBuddyError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
