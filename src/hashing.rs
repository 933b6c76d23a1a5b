use bcrypt::{DEFAULT_COST, hash as bcrypt_hash, verify as bcrypt_verify};

use crate::error::ApiError;

/// Produces a salted bcrypt digest of a plaintext password. The digest is
/// what gets persisted; the plaintext never leaves the registration
/// handler.
pub fn hash(plain: &str) -> Result<String, ApiError> {
    bcrypt_hash(plain, DEFAULT_COST)
        .map_err(|err| ApiError::Internal(format!("password hashing failed: {err}")))
}

/// Checks a plaintext password against a stored digest. A digest that
/// cannot be parsed counts as a mismatch rather than an error, so a
/// corrupted row cannot be used to log in.
pub fn verify(digest: &str, plain: &str) -> bool {
    bcrypt_verify(plain, digest).unwrap_or(false)
}
