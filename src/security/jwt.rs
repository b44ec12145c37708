/// JWT issuance and verification.
///
/// Access and refresh tokens are HS256-signed with two independent secrets so
/// that leaking one does not compromise the other. Any mutation of claims or
/// expiry invalidates the signature; expired or tampered tokens surface as
/// authentication errors.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::models::Role;

/// `token_type` claim value carried by every refresh token.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user id.
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token id, for audit trails.
    pub jti: String,
}

/// Claims embedded in every refresh token.
///
/// The `jti` claim makes every issued token distinct even when two are minted
/// for the same user within the same second, so rotation always yields a new
/// token value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Signs and verifies the two token kinds.
///
/// Built once from validated [`Config`] and injected wherever tokens are
/// minted or checked; no global key state.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &Config) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        }
    }

    /// Issue a signed access token carrying `{sub, email, role}`.
    pub fn issue_access_token(&self, user_id: Uuid, email: &str, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|_| AuthError::Internal("Failed to sign access token".to_string()))
    }

    /// Issue a signed refresh token and return it with its absolute expiry,
    /// which the caller persists alongside the token.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.refresh_ttl;
        let claims = RefreshClaims {
            sub: user_id,
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|_| AuthError::Internal("Failed to sign refresh token".to_string()))?;

        Ok((token, expires_at))
    }

    /// Validate an access token's signature and expiry, returning its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims> {
        decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidAccessToken)
    }

    /// Validate a refresh token's signature, expiry, and `token_type` claim.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims> {
        let claims = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.token_type != REFRESH_TOKEN_TYPE {
            return Err(AuthError::InvalidRefreshToken);
        }
        Ok(claims)
    }
}
