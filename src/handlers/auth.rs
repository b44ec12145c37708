/// Authentication handlers
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AuthError, Result};
use crate::middleware::{AuthUser, RequireAdmin};
use crate::models::user::{
    AuthResponse, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest,
};
use crate::models::SanitizedUser;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeAllResponse {
    pub user_id: Uuid,
    pub message: String,
}

fn validated<T: Validate>(payload: &T) -> Result<()> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validated(&payload)?;

    let response = state
        .auth
        .register(
            &payload.email,
            &payload.first_name,
            &payload.last_name,
            &payload.password,
            payload.role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    validated(&payload)?;

    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>> {
    validated(&payload)?;

    let response = state
        .auth
        .refresh_access_token(&payload.refresh_token)
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Option<Json<LogoutRequest>>,
) -> Result<StatusCode> {
    let refresh_token = payload.and_then(|Json(body)| body.refresh_token);

    state
        .auth
        .logout(user.user_id, refresh_token.as_deref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/revoke-all — admin-triggered forced logout of a user.
pub async fn revoke_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<RevokeAllRequest>,
) -> Result<Json<RevokeAllResponse>> {
    state.auth.revoke_all_tokens(payload.user_id).await?;

    Ok(Json(RevokeAllResponse {
        user_id: payload.user_id,
        message: "All sessions revoked".to_string(),
    }))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeAllRequest {
    pub user_id: Uuid,
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<SanitizedUser>> {
    let current = state.auth.current_user(user.user_id).await?;
    Ok(Json(current.sanitize()))
}
