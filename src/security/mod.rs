/// Security module: password hashing and JWT issuance/verification.
pub mod jwt;
pub mod password;

pub use jwt::{AccessClaims, RefreshClaims, TokenIssuer, REFRESH_TOKEN_TYPE};
pub use password::PasswordHasher;
