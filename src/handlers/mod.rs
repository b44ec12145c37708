pub mod auth;

pub use auth::{login, logout, me, refresh_token, register, revoke_all};
