use secrecy::SecretString;
use serde::Deserialize;

/// Signing material and lifetime for access tokens.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub expiration_minutes: i64,
}

impl JwtSettings {
    pub fn new(secret: String, expiration_minutes: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            expiration_minutes,
        }
    }
}
