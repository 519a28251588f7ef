//! User repository implementation

use sqlx::PgPool;
use crate::models::user::User;
use crate::utils::errors::TransitBuddyError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user by Telegram id; a repeat registration is a no-op
    pub async fn register(&self, id: i64) -> Result<(), TransitBuddyError> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Find user by Telegram id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, TransitBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
