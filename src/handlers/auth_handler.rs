// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::credentials::authenticate_user;
use crate::auth::gate::CurrentUser;
use crate::auth::jwt::create_access_token;
use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::models::auth::{LoginForm, TokenResponse};

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Form<LoginForm>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse, ApiError> {
    let user = authenticate_user(
        pool.get_ref(),
        &login_form.username,
        login_form.password.expose_secret(),
    )
    .await?
    .ok_or_else(|| ApiError::Unauthenticated("Incorrect username or password".to_string()))?;

    let token = create_access_token(&user.username, None, &jwt_settings)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

pub async fn current_user_profile(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0)
}
