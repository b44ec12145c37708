/// Data models for authentication
pub mod token;
pub mod user;

pub use token::RefreshTokenRecord;
pub use user::{Role, SanitizedUser, User};
