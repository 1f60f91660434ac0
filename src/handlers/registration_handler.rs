use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::db;
use crate::error::ApiError;
use crate::models::user::{RegisteredUser, RegistrationRequest};

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>
) -> Result<HttpResponse, ApiError> {
    let username = user_form.username.trim();
    let email = user_form.email.trim();
    if username.is_empty() || email.is_empty() || user_form.password.expose_secret().is_empty() {
        return Err(ApiError::BadRequest("Username, email and password are required".to_string()));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    if db::users::username_exists(pool.get_ref(), username).await? {
        return Err(ApiError::ValidationConflict("Username already taken".to_string()));
    }
    if db::users::email_exists(pool.get_ref(), email).await? {
        return Err(ApiError::ValidationConflict("Email already registered".to_string()));
    }

    let hashed_password = hash_password(user_form.password.expose_secret())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    // A concurrent registration can still slip past the checks above.
    let user = db::users::insert_user(pool.get_ref(), username, email, &hashed_password)
        .await
        .map_err(|e| ApiError::from_db(e, "Username or email already registered"))?;

    tracing::info!("User {} registered", user.id);
    Ok(HttpResponse::Created().json(RegisteredUser::from(user)))
}
