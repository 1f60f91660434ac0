use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::gate::{AdminUser, CurrentUser};
use crate::db;
use crate::error::ApiError;
use crate::models::common::page_bounds;
use crate::models::team::{TeamCreate, TeamQueryParams, TeamUpdate};

const NAME_TAKEN: &str = "A team with this name already exists";

fn team_not_found(team_id: i64) -> ApiError {
    ApiError::NotFound(format!("Team {} not found", team_id))
}

// GET /teams/
pub async fn list_teams(
    pool: web::Data<PgPool>,
    query: web::Query<TeamQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let (skip, limit) = page_bounds(query.skip, query.limit);
    let country = query.country.as_deref().filter(|c| !c.is_empty());

    let teams = db::teams::list_teams(pool.get_ref(), skip, limit, country).await?;
    Ok(HttpResponse::Ok().json(teams))
}

// GET /teams/{id}
pub async fn get_team(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let team_id = path.into_inner();
    let team = db::teams::find_team(pool.get_ref(), team_id)
        .await?
        .ok_or_else(|| team_not_found(team_id))?;
    Ok(HttpResponse::Ok().json(team))
}

// POST /teams/
#[tracing::instrument(name = "Create team", skip(pool, body, user), fields(team_name = %body.name, username = %user.username))]
pub async fn create_team(
    pool: web::Data<PgPool>,
    body: web::Json<TeamCreate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    if db::teams::name_taken(&mut *tx, &body.name, None).await? {
        return Err(ApiError::ValidationConflict(NAME_TAKEN.to_string()));
    }
    let team = db::teams::insert_team(&mut *tx, &body)
        .await
        .map_err(|e| ApiError::from_db(e, NAME_TAKEN))?;
    tx.commit().await?;

    tracing::info!("Created team {}", team.id);
    Ok(HttpResponse::Created().json(team))
}

// PATCH /teams/{id}
#[tracing::instrument(name = "Update team", skip(pool, body, user), fields(username = %user.username))]
pub async fn update_team(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    body: web::Json<TeamUpdate>,
    user: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let team_id = path.into_inner();
    let update = body.into_inner();
    update.validate().map_err(ApiError::BadRequest)?;

    let mut tx = pool.begin().await?;
    let mut team = db::teams::find_team_for_update(&mut *tx, team_id)
        .await?
        .ok_or_else(|| team_not_found(team_id))?;

    if let Some(name) = &update.name {
        if db::teams::name_taken(&mut *tx, name, Some(team_id)).await? {
            return Err(ApiError::ValidationConflict(NAME_TAKEN.to_string()));
        }
    }

    team.merge(update);
    let team = db::teams::update_team(&mut *tx, &team)
        .await
        .map_err(|e| ApiError::from_db(e, NAME_TAKEN))?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(team))
}

// DELETE /teams/{id}
//
// Players of the team are detached by the schema; a team that has played
// matches stays.
#[tracing::instrument(name = "Delete team", skip(pool, admin), fields(username = %admin.username))]
pub async fn delete_team(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let team_id = path.into_inner();

    let mut tx = pool.begin().await?;
    if !db::teams::team_exists(&mut *tx, team_id).await? {
        return Err(team_not_found(team_id));
    }
    if db::teams::team_has_matches(&mut *tx, team_id).await? {
        return Err(ApiError::InUse(format!(
            "Team {} is referenced by matches and cannot be deleted",
            team_id
        )));
    }
    db::teams::delete_team(&mut *tx, team_id).await?;
    tx.commit().await?;

    tracing::info!("Deleted team {}", team_id);
    Ok(HttpResponse::NoContent().finish())
}
