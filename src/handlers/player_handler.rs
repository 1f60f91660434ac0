use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::gate::{AdminUser, CurrentUser};
use crate::db;
use crate::error::ApiError;
use crate::models::common::page_bounds;
use crate::models::player::{PlayerCreate, PlayerQueryParams, PlayerUpdate};

fn player_not_found(player_id: i64) -> ApiError {
    ApiError::NotFound(format!("Player {} not found", player_id))
}

async fn ensure_team<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    team_id: Option<i64>,
) -> Result<(), ApiError> {
    if let Some(team_id) = team_id {
        if !db::teams::team_exists(executor, team_id).await? {
            return Err(ApiError::InvalidReference(format!("Team {} does not exist", team_id)));
        }
    }
    Ok(())
}

// GET /players/
pub async fn list_players(
    pool: web::Data<PgPool>,
    query: web::Query<PlayerQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let (skip, limit) = page_bounds(query.skip, query.limit);
    let name = query.name.as_deref().filter(|n| !n.is_empty());

    let players = db::players::list_players(pool.get_ref(), skip, limit, query.team_id, name).await?;
    Ok(HttpResponse::Ok().json(players))
}

// GET /players/{id}
pub async fn get_player(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    let player = db::players::find_player(pool.get_ref(), player_id)
        .await?
        .ok_or_else(|| player_not_found(player_id))?;
    Ok(HttpResponse::Ok().json(player))
}

// GET /players/{id}/stats
pub async fn get_player_stats(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    if !db::players::player_exists(pool.get_ref(), player_id).await? {
        return Err(player_not_found(player_id));
    }
    let stats = db::player_stats::stats_for_player(pool.get_ref(), player_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

// POST /players/
#[tracing::instrument(name = "Create player", skip(pool, body, user), fields(player_name = %body.name, username = %user.username))]
pub async fn create_player(
    pool: web::Data<PgPool>,
    body: web::Json<PlayerCreate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    ensure_team(&mut *tx, body.team_id).await?;
    let player = db::players::insert_player(&mut *tx, &body)
        .await
        .map_err(|e| ApiError::from_db(e, "Player already exists"))?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(player))
}

// PATCH /players/{id}
#[tracing::instrument(name = "Update player", skip(pool, body, user), fields(username = %user.username))]
pub async fn update_player(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<PlayerUpdate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    let update = body.into_inner();
    update.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    let mut player = db::players::find_player_for_update(&mut *tx, player_id)
        .await?
        .ok_or_else(|| player_not_found(player_id))?;
    if let Some(team_id) = update.team_id {
        ensure_team(&mut *tx, team_id).await?;
    }

    player.merge(update);
    let player = db::players::update_player(&mut *tx, &player)
        .await
        .map_err(|e| ApiError::from_db(e, "Player already exists"))?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(player))
}

// DELETE /players/{id}
#[tracing::instrument(name = "Delete player", skip(pool, admin), fields(username = %admin.username))]
pub async fn delete_player(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let player_id = path.into_inner();
    if db::players::delete_player(pool.get_ref(), player_id).await? == 0 {
        return Err(player_not_found(player_id));
    }
    tracing::info!("Deleted player {}", player_id);
    Ok(HttpResponse::NoContent().finish())
}
