/// Auth session manager: register / login / refresh / logout / revoke-all.
///
/// Authentication is stateless at the access-token layer (any holder of a
/// valid signed, unexpired access token is authenticated) and semi-stateful
/// at the refresh layer: refresh tokens are persisted, one-time-use, and
/// checked against revocation state on every rotation.
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{NewUser, RefreshTokenStore, UserDirectory};
use crate::error::{AuthError, Result};
use crate::models::user::AuthResponse;
use crate::models::{Role, User};
use crate::security::{PasswordHasher, TokenIssuer};

pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    tokens: Arc<dyn RefreshTokenStore>,
    issuer: TokenIssuer,
    hasher: PasswordHasher,
    /// Echoed to clients as `expiresIn`, e.g. `"15m"`.
    access_ttl_label: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        tokens: Arc<dyn RefreshTokenStore>,
        issuer: TokenIssuer,
        hasher: PasswordHasher,
        access_ttl_label: String,
    ) -> Self {
        Self {
            users,
            tokens,
            issuer,
            hasher,
            access_ttl_label,
        }
    }

    /// Create a user and open their first session.
    ///
    /// The lookup-then-insert pair is not race-safe; the directory's unique
    /// index on email turns the losing insert into the same `Conflict`.
    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<AuthResponse> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
                role: role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");

        self.generate_tokens(&user).await
    }

    /// Verify credentials and open a session.
    ///
    /// "Unknown email" and "wrong password" are indistinguishable to the
    /// caller. The inactive-account message is only reachable after a correct
    /// password, so it leaks nothing the password did not already prove.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::AccountInactive);
        }

        let now = Utc::now();
        self.users.record_login(user.id, now).await?;
        let user = User {
            last_login: Some(now),
            updated_at: now,
            ..user
        };

        tracing::info!(user_id = %user.id, "user logged in");

        self.generate_tokens(&user).await
    }

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// Rotation makes refresh tokens one-time-use: the presented token is
    /// revoked once the replacement pair exists, so a captured token is
    /// useless after its first legitimate use.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<AuthResponse> {
        let record = self
            .tokens
            .find_active(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !record.is_usable(Utc::now()) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthError::InvalidRefreshToken)?;

        let response = self.generate_tokens(&user).await?;

        self.tokens.revoke(record.id).await?;

        tracing::info!(user_id = %user.id, "refresh token rotated");

        Ok(response)
    }

    /// Best-effort revocation of a single session. Idempotent: an unknown or
    /// already-revoked token is a no-op success.
    ///
    /// `user_id` is accepted for interface symmetry with the other session
    /// operations; only the supplied token is acted on.
    pub async fn logout(&self, user_id: Uuid, refresh_token: Option<&str>) -> Result<()> {
        if let Some(token) = refresh_token {
            if let Some(record) = self.tokens.find_active(token).await? {
                self.tokens.revoke(record.id).await?;
            }
        }

        tracing::info!(%user_id, "user logged out");
        Ok(())
    }

    /// Forced logout of every session/device owned by `user_id`.
    pub async fn revoke_all_tokens(&self, user_id: Uuid) -> Result<()> {
        self.tokens.revoke_all_for_user(user_id).await?;
        tracing::info!(%user_id, "all refresh tokens revoked");
        Ok(())
    }

    /// Sanitized view of the user behind a verified access token.
    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Mint an access/refresh pair for `user` and persist the refresh token.
    async fn generate_tokens(&self, user: &User) -> Result<AuthResponse> {
        let access_token = self
            .issuer
            .issue_access_token(user.id, &user.email, user.role)?;
        let (refresh_token, expires_at) = self.issuer.issue_refresh_token(user.id)?;

        self.tokens
            .save(user.id, &refresh_token, expires_at)
            .await?;

        Ok(AuthResponse {
            user: user.sanitize(),
            access_token,
            refresh_token,
            expires_in: self.access_ttl_label.clone(),
        })
    }
}
