//! Search history repository implementation

use sqlx::PgPool;
use crate::models::search::{CreateSearchRequest, SearchRecord};
use crate::utils::errors::TransitBuddyError;

#[derive(Debug, Clone)]
pub struct SearchRepository {
    pool: PgPool,
}

impl SearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a completed search
    pub async fn create(&self, request: CreateSearchRequest) -> Result<SearchRecord, TransitBuddyError> {
        let record = sqlx::query_as::<_, SearchRecord>(
            r#"
            INSERT INTO searches (user_id, search_type, departure_station, arrival_station, date, transport)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, search_type, departure_station, arrival_station, date, transport, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.search_type.code())
        .bind(request.departure_station)
        .bind(request.arrival_station)
        .bind(request.date)
        .bind(request.transport.code())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Latest searches for a user, newest first
    pub async fn recent_for_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SearchRecord>, TransitBuddyError> {
        let records = sqlx::query_as::<_, SearchRecord>(
            r#"
            SELECT id, user_id, search_type, departure_station, arrival_station, date, transport, created_at
            FROM searches
            WHERE user_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
