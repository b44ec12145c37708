/// Password hashing and verification using bcrypt.
use crate::error::Result;

/// One-way credential hasher with a configurable cost factor.
///
/// The cost comes from configuration (default 10) so tests can run with the
/// minimum cost instead of the deliberately slow production setting.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password. The salt is generated per call and embedded
    /// in the returned hash string.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A malformed stored hash is a verification failure, not an error: the
    /// caller treats it exactly like a wrong password.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        bcrypt::verify(plaintext, hashed).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost (4) keeps the suite fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("Password123!").unwrap();

        assert_ne!(hash, "Password123!");
        assert!(hasher.verify("Password123!", &hash));
        assert!(!hasher.verify("WrongPassword1!", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("Password123!").unwrap();
        let second = hasher.hash("Password123!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_fails_verification_without_panicking() {
        let hasher = hasher();
        assert!(!hasher.verify("Password123!", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("Password123!", ""));
    }
}
