//! User credentials and bcrypt secret hashes.

use crate::domain::UserId;
use crate::error::DomainError;

/// Default bcrypt work factor for newly hashed secrets.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// A salted bcrypt hash of a user's secret code.
///
/// The hash string is opaque to the rest of the system; the only thing you
/// can do with it is verify a candidate secret against it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wraps a hash loaded from storage. No validation happens here; an
    /// unparsable hash simply never verifies.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Hashes a plain secret with a fresh salt.
    pub fn generate(secret: &str, cost: u32) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::ValidationError(
                "Secret code cannot be empty".into(),
            ));
        }

        bcrypt::hash(secret, cost)
            .map(Self)
            .map_err(|e| DomainError::Hashing(e.to_string()))
    }

    /// Verifies a candidate secret. bcrypt does the comparison in constant
    /// time and is deliberately slow, so call this off the async runtime.
    pub fn verify(&self, secret: &str) -> bool {
        bcrypt::verify(secret, &self.0).unwrap_or(false)
    }

    /// Returns the stored hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}

/// A user as seen by the credential store.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub user_name: String,
    pub secret_hash: SecretHash,
}
