use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::gate::{AdminUser, CurrentUser};
use crate::db;
use crate::error::ApiError;
use crate::models::player_stat::{PlayerStatCreate, PlayerStatUpdate};

fn stat_not_found(stat_id: i64) -> ApiError {
    ApiError::NotFound(format!("Player stat {} not found", stat_id))
}

// GET /stats/{id}
pub async fn get_stat(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let stat_id = path.into_inner();
    let stat = db::player_stats::find_stat(pool.get_ref(), stat_id)
        .await?
        .ok_or_else(|| stat_not_found(stat_id))?;
    Ok(HttpResponse::Ok().json(stat))
}

// POST /stats/
#[tracing::instrument(
    name = "Record player stat",
    skip(pool, body, user),
    fields(player_id = body.player_id, match_id = body.match_id, username = %user.username)
)]
pub async fn create_stat(
    pool: web::Data<PgPool>,
    body: web::Json<PlayerStatCreate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    if !db::players::player_exists(&mut *tx, body.player_id).await? {
        return Err(ApiError::InvalidReference(format!("Player {} does not exist", body.player_id)));
    }
    if !db::matches::match_exists(&mut *tx, body.match_id).await? {
        return Err(ApiError::InvalidReference(format!("Match {} does not exist", body.match_id)));
    }
    let stat = db::player_stats::insert_stat(&mut *tx, &body)
        .await
        .map_err(|e| ApiError::from_db(e, "Player stat already exists"))?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(stat))
}

// PATCH /stats/{id}
#[tracing::instrument(name = "Update player stat", skip(pool, body, user), fields(username = %user.username))]
pub async fn update_stat(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<PlayerStatUpdate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let stat_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let mut stat = db::player_stats::find_stat_for_update(&mut *tx, stat_id)
        .await?
        .ok_or_else(|| stat_not_found(stat_id))?;

    stat.merge(body.into_inner());
    stat.validate().map_err(ApiError::BadRequest)?;
    let stat = db::player_stats::update_stat(&mut *tx, &stat).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(stat))
}

// DELETE /stats/{id}
#[tracing::instrument(name = "Delete player stat", skip(pool, admin), fields(username = %admin.username))]
pub async fn delete_stat(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let stat_id = path.into_inner();
    if db::player_stats::delete_stat(pool.get_ref(), stat_id).await? == 0 {
        return Err(stat_not_found(stat_id));
    }
    Ok(HttpResponse::NoContent().finish())
}
