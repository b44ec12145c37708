use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::RefreshTokenStore;
use crate::error::Result;
use crate::models::RefreshTokenRecord;

/// Postgres-backed [`RefreshTokenStore`].
#[derive(Clone)]
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn save(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, is_revoked, created_at)
            VALUES (gen_random_uuid(), $1, $2, $3, false, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    // Expiry is intentionally not part of the WHERE clause; the caller
    // re-checks it against its own clock.
    async fn find_active(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            SELECT * FROM refresh_tokens WHERE token = $1 AND is_revoked = false
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn revoke(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens SET is_revoked = true WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens SET is_revoked = true WHERE user_id = $1 AND is_revoked = false
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
