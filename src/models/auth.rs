// src/models/auth.rs
use serde::{Deserialize, Serialize};
use secrecy::SecretString;

/// OAuth2 password-flow form, sent as `application/x-www-form-urlencoded`.
#[derive(Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(serialize_with = "crate::models::user::serialize_secret_string",
            deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
