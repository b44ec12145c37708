/// Test fixtures: in-memory store implementations and a service harness.
///
/// The session manager only sees the `UserDirectory` / `RefreshTokenStore`
/// traits, so the whole operation surface is testable against these
/// in-memory doubles without a database.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::db::{NewUser, RefreshTokenStore, UserDirectory};
use crate::error::{AuthError, Result};
use crate::models::{RefreshTokenRecord, User};
use crate::security::{PasswordHasher, TokenIssuer};
use crate::services::AuthService;

pub const TEST_EMAIL: &str = "a@x.com";
pub const TEST_PASSWORD: &str = "Password123!";

#[derive(Default)]
pub struct MemoryUserDirectory {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserDirectory {
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn user_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn set_active(&self, email: &str, is_active: bool) {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.email == email)
            .expect("fixture user exists");
        user.is_active = is_active;
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut rows = self.rows.lock().unwrap();
        // Unique-index backstop.
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.user_by_email(email))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
            user.updated_at = at;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    rows: Mutex<Vec<RefreshTokenRecord>>,
}

impl MemoryRefreshTokenStore {
    pub fn record_for(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token == token)
            .cloned()
    }

    pub fn active_count_for(&self, user_id: Uuid) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && !r.is_revoked)
            .count()
    }

    /// Push a token's expiry into the past without revoking it.
    pub fn force_expire(&self, token: &str) {
        let mut rows = self.rows.lock().unwrap();
        let record = rows
            .iter_mut()
            .find(|r| r.token == token)
            .expect("fixture token exists");
        record.expires_at = Utc::now() - Duration::seconds(1);
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn save(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord> {
        let record = RefreshTokenRecord {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_active(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        // Matches the SQL: filters revocation only, never expiry.
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token == token && !r.is_revoked)
            .cloned())
    }

    async fn revoke(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(record) = rows.iter_mut().find(|r| r.id == id) {
            record.is_revoked = true;
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        for record in rows.iter_mut().filter(|r| r.user_id == user_id) {
            record.is_revoked = true;
        }
        Ok(())
    }
}

/// Service wired to in-memory stores, with handles kept for inspection.
pub struct Harness {
    pub auth: AuthService,
    pub users: Arc<MemoryUserDirectory>,
    pub tokens: Arc<MemoryRefreshTokenStore>,
}

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "postgres://unused".to_string(),
        jwt_secret: "test-access-secret".to_string(),
        jwt_refresh_secret: "test-refresh-secret".to_string(),
        jwt_expiration: "15m".to_string(),
        jwt_refresh_expiration: "7d".to_string(),
        // Minimum bcrypt cost keeps the suite fast.
        bcrypt_cost: 4,
    }
}

pub fn harness() -> Harness {
    let config = test_config();
    let users = Arc::new(MemoryUserDirectory::default());
    let tokens = Arc::new(MemoryRefreshTokenStore::default());

    let auth = AuthService::new(
        users.clone(),
        tokens.clone(),
        TokenIssuer::new(&config),
        PasswordHasher::new(config.bcrypt_cost),
        config.jwt_expiration.clone(),
    );

    Harness {
        auth,
        users,
        tokens,
    }
}

/// Register the standard fixture user and return the response.
pub async fn register_test_user(harness: &Harness) -> crate::models::user::AuthResponse {
    harness
        .auth
        .register(TEST_EMAIL, "A", "B", TEST_PASSWORD, None)
        .await
        .expect("fixture registration succeeds")
}
