//! Request-level authentication and role checks.
//!
//! Handlers opt in by taking [`CurrentUser`] or [`AdminUser`] as an argument:
//!
//! ```rust,ignore
//! async fn delete_team(admin: AdminUser, ...) -> Result<HttpResponse, ApiError>
//! ```
//!
//! Both extractors read `Authorization: Bearer <token>`, decode it and load the
//! user on every request. Nothing is cached between requests.

use std::ops::Deref;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::credentials::UserDirectory;
use crate::auth::jwt::{decode_token, TokenError};
use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::models::user::User;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve a bearer token to the persisted user it names.
pub async fn get_current_user<D: UserDirectory>(
    directory: &D,
    settings: &JwtSettings,
    token: Option<&str>,
) -> Result<User, ApiError> {
    let token = token.ok_or_else(|| ApiError::Unauthenticated("Not authenticated".to_string()))?;

    let claims = decode_token(token, settings).map_err(|e| match e {
        TokenError::Expired => ApiError::Unauthenticated("Token has expired".to_string()),
        _ => ApiError::Unauthenticated("Could not validate credentials".to_string()),
    })?;

    directory
        .find_by_username(&claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject no longer exists: {}", claims.sub);
            ApiError::Unauthenticated("Could not validate credentials".to_string())
        })
}

/// As [`get_current_user`], then require the admin role.
pub async fn get_admin_user<D: UserDirectory>(
    directory: &D,
    settings: &JwtSettings,
    token: Option<&str>,
) -> Result<User, ApiError> {
    let user = get_current_user(directory, settings, token).await?;
    if !user.is_admin {
        tracing::warn!("Non-admin user attempted admin access: {}", user.username);
        return Err(ApiError::Forbidden("Admin privileges required".to_string()));
    }
    Ok(user)
}

/// Shared plumbing of both extractors: app data plus the raw token.
fn request_context(req: &HttpRequest) -> Result<(web::Data<PgPool>, web::Data<JwtSettings>, Option<String>), ApiError> {
    let pool = req
        .app_data::<web::Data<PgPool>>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("Database pool not configured".to_string()))?;
    let settings = req
        .app_data::<web::Data<JwtSettings>>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("JWT settings not configured".to_string()))?;
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);
    Ok((pool, settings, token))
}

/// Any authenticated user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = request_context(req);
        Box::pin(async move {
            let (pool, settings, token) = context?;
            get_current_user(pool.get_ref(), &settings, token.as_deref())
                .await
                .map(CurrentUser)
        })
    }
}

/// An authenticated user holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl Deref for AdminUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = request_context(req);
        Box::pin(async move {
            let (pool, settings, token) = context?;
            get_admin_user(pool.get_ref(), &settings, token.as_deref())
                .await
                .map(AdminUser)
        })
    }
}
