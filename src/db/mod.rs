/// Persistence layer: repository traits and their Postgres implementations.
///
/// The session manager depends only on [`UserDirectory`] and
/// [`RefreshTokenStore`]; tests substitute in-memory implementations.
pub mod token_repo;
pub mod user_repo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{RefreshTokenRecord, Role, User};

pub use token_repo::PgRefreshTokenStore;
pub use user_repo::PgUserDirectory;

/// Fields required to create a user row; everything else is store-generated.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new user. The store's unique index on `email` is the backstop
    /// against concurrent duplicate registration; a violation surfaces as
    /// [`crate::error::AuthError::EmailAlreadyExists`].
    async fn create(&self, new_user: NewUser) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Set `last_login` (and bump `updated_at`) for a successful login.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn save(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord>;

    /// Look up a non-revoked record by token value.
    ///
    /// Expiry is deliberately not filtered here; callers re-check it via
    /// [`RefreshTokenRecord::is_usable`].
    async fn find_active(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;

    /// Mark a single record revoked. Revocation is permanent.
    async fn revoke(&self, id: Uuid) -> Result<()>;

    /// Mark every active record owned by `user_id` revoked. Not required to
    /// be atomic: a failure mid-way leaves a strict subset revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<()>;
}
