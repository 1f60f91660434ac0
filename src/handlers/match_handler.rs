use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::gate::{AdminUser, CurrentUser};
use crate::db;
use crate::error::ApiError;
use crate::models::common::page_bounds;
use crate::models::matches::{MatchCreate, MatchQueryParams, MatchUpdate};

fn match_not_found(match_id: i64) -> ApiError {
    ApiError::NotFound(format!("Match {} not found", match_id))
}

/// Both sides of a fixture must be known teams.
async fn ensure_teams(
    conn: &mut sqlx::PgConnection,
    home_team_id: i64,
    away_team_id: i64,
) -> Result<(), ApiError> {
    for team_id in [home_team_id, away_team_id] {
        if !db::teams::team_exists(&mut *conn, team_id).await? {
            return Err(ApiError::InvalidReference(format!("Team {} does not exist", team_id)));
        }
    }
    Ok(())
}

// GET /matches/
pub async fn list_matches(
    pool: web::Data<PgPool>,
    query: web::Query<MatchQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let (skip, limit) = page_bounds(query.skip, query.limit);
    let season = query.season.as_deref().filter(|s| !s.is_empty());

    let matches = db::matches::list_matches(
        pool.get_ref(),
        skip,
        limit,
        query.team_id,
        season,
        query.status,
    )
    .await?;
    Ok(HttpResponse::Ok().json(matches))
}

// GET /matches/{id}
pub async fn get_match(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    let fixture = db::matches::find_match(pool.get_ref(), match_id)
        .await?
        .ok_or_else(|| match_not_found(match_id))?;
    Ok(HttpResponse::Ok().json(fixture))
}

// GET /matches/{id}/stats
pub async fn get_match_stats(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    if !db::matches::match_exists(pool.get_ref(), match_id).await? {
        return Err(match_not_found(match_id));
    }
    let stats = db::player_stats::stats_for_match(pool.get_ref(), match_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

// POST /matches/
#[tracing::instrument(name = "Create match", skip(pool, body, user), fields(username = %user.username))]
pub async fn create_match(
    pool: web::Data<PgPool>,
    body: web::Json<MatchCreate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    ensure_teams(&mut tx, body.home_team_id, body.away_team_id).await?;
    let fixture = db::matches::insert_match(&mut *tx, &body)
        .await
        .map_err(|e| ApiError::from_db(e, "Match already exists"))?;
    tx.commit().await?;

    tracing::info!("Created match {}", fixture.id);
    Ok(HttpResponse::Created().json(fixture))
}

// PATCH /matches/{id}
#[tracing::instrument(name = "Update match", skip(pool, body, user), fields(username = %user.username))]
pub async fn update_match(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<MatchUpdate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    let update = body.into_inner();
    update.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    let mut fixture = db::matches::find_match_for_update(&mut *tx, match_id)
        .await?
        .ok_or_else(|| match_not_found(match_id))?;

    fixture.merge(update);
    ensure_teams(&mut tx, fixture.home_team_id, fixture.away_team_id).await?;
    let fixture = db::matches::update_match(&mut *tx, &fixture)
        .await
        .map_err(|e| ApiError::from_db(e, "Match already exists"))?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(fixture))
}

// DELETE /matches/{id}
#[tracing::instrument(name = "Delete match", skip(pool, admin), fields(username = %admin.username))]
pub async fn delete_match(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let match_id = path.into_inner();
    if db::matches::delete_match(pool.get_ref(), match_id).await? == 0 {
        return Err(match_not_found(match_id));
    }
    tracing::info!("Deleted match {}", match_id);
    Ok(HttpResponse::NoContent().finish())
}
