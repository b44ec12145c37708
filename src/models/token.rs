/// Refresh token model
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A row in the `refresh_tokens` table.
///
/// The `token` column holds the signed refresh-token string itself; it is an
/// opaque secret that is compared, never logged. Rows are disposable state:
/// one is inserted per issuance and flipped to revoked on rotation or logout,
/// never flipped back.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// A token is usable for rotation iff it is unrevoked and unexpired.
    ///
    /// The store only filters on `is_revoked`; the expiry half of the
    /// invariant is checked here by the caller.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}
