// Back-office authentication service library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use error::{AuthError, Result};
pub use models::{RefreshTokenRecord, Role, SanitizedUser, User};
pub use services::AuthService;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub issuer: security::TokenIssuer,
}
