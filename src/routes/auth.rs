// src/routes/auth.rs
use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::auth::gate::CurrentUser;
use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::handlers::auth_handler::{current_user_profile, login_user};
use crate::models::auth::LoginForm;

#[post("/token")]
async fn login(
    login_form: web::Form<LoginForm>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse, ApiError> {
    login_user(login_form, pool, jwt_settings).await
}

#[get("/me")]
async fn me(user: CurrentUser) -> HttpResponse {
    current_user_profile(user).await
}
