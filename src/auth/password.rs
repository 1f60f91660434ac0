use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Salted bcrypt hash; two calls on the same input give different strings.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// False on mismatch and on a malformed hash alike.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}
