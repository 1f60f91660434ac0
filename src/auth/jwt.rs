use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::jwt::JwtSettings;

/// Tokens are only ever signed and accepted with this algorithm.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Username of the token holder.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token has expired")]
    Expired,
    #[error("Failed to sign token: {0}")]
    Encoding(String),
}

/// Sign an access token for `subject`.
///
/// `expires_in` falls back to the configured lifetime.
pub fn create_access_token(
    subject: &str,
    expires_in: Option<Duration>,
    settings: &JwtSettings,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let expires_in = expires_in.unwrap_or_else(|| Duration::minutes(settings.expiration_minutes));
    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => {
            tracing::debug!("Rejected token: {:?}", e);
            TokenError::Invalid
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JwtSettings {
        JwtSettings::new("test-secret".to_string(), 30)
    }

    #[test]
    fn decoded_token_keeps_subject() {
        let settings = settings();
        let token = create_access_token("alice", None, &settings).unwrap();
        let claims = decode_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let settings = settings();
        let token = create_access_token("alice", Some(Duration::seconds(-10)), &settings).unwrap();
        assert_eq!(decode_token(&token, &settings), Err(TokenError::Expired));
    }

    #[test]
    fn token_from_another_key_is_invalid() {
        let token = create_access_token("alice", None, &settings()).unwrap();
        let other = JwtSettings::new("another-secret".to_string(), 30);
        assert_eq!(decode_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn token_with_another_algorithm_is_invalid() {
        let settings = settings();
        let now = Utc::now().timestamp();
        let claims = Claims { sub: "alice".into(), iat: now, exp: now + 600 };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(decode_token(&token, &settings), Err(TokenError::Invalid));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let settings = settings();
        let token = create_access_token("alice", None, &settings).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = create_access_token("mallory", None, &settings)
            .unwrap()
            .split('.')
            .nth(1)
            .unwrap()
            .to_string();
        assert_eq!(decode_token(&parts.join("."), &settings), Err(TokenError::Invalid));
        assert_eq!(decode_token("garbage", &settings), Err(TokenError::Invalid));
    }
}
