use sqlx::PgExecutor;

use crate::models::user::User;

const USER_COLUMNS: &str = "id, username, email, hashed_password, is_admin, created_at";

pub async fn find_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS))
        .bind(username)
        .fetch_optional(executor)
        .await
}

pub async fn username_exists<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await
}

pub async fn email_exists<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
}

pub async fn insert_user<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    email: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, email, hashed_password)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .fetch_one(executor)
    .await
}
