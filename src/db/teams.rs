use sqlx::PgExecutor;

use crate::models::team::{Team, TeamCreate};

const TEAM_COLUMNS: &str =
    "id, name, short_name, country, founded, stadium, stadium_capacity, manager, external_id";

pub async fn list_teams<'e>(
    executor: impl PgExecutor<'e>,
    skip: i64,
    limit: i64,
    country: Option<&str>,
) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(&format!(
        r#"
        SELECT {}
        FROM teams
        WHERE ($1::TEXT IS NULL OR country ILIKE '%' || $1 || '%')
        ORDER BY id
        OFFSET $2 LIMIT $3
        "#,
        TEAM_COLUMNS
    ))
    .bind(country)
    .bind(skip)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn find_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i64,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(&format!("SELECT {} FROM teams WHERE id = $1", TEAM_COLUMNS))
        .bind(team_id)
        .fetch_optional(executor)
        .await
}

/// Row lock for read-modify-write updates.
pub async fn find_team_for_update<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i64,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(&format!(
        "SELECT {} FROM teams WHERE id = $1 FOR UPDATE",
        TEAM_COLUMNS
    ))
    .bind(team_id)
    .fetch_optional(executor)
    .await
}

pub async fn team_exists<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)")
        .bind(team_id)
        .fetch_one(executor)
        .await
}

/// Whether another team than `except_id` already uses `name`.
pub async fn name_taken<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM teams WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(name)
    .bind(except_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_team<'e>(
    executor: impl PgExecutor<'e>,
    team: &TeamCreate,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(&format!(
        r#"
        INSERT INTO teams (name, short_name, country, founded, stadium, stadium_capacity, manager)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        TEAM_COLUMNS
    ))
    .bind(&team.name)
    .bind(&team.short_name)
    .bind(&team.country)
    .bind(team.founded)
    .bind(&team.stadium)
    .bind(team.stadium_capacity)
    .bind(&team.manager)
    .fetch_one(executor)
    .await
}

/// Write back every mutable column of an already merged team.
pub async fn update_team<'e>(
    executor: impl PgExecutor<'e>,
    team: &Team,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(&format!(
        r#"
        UPDATE teams
        SET name = $2, short_name = $3, country = $4, founded = $5,
            stadium = $6, stadium_capacity = $7, manager = $8
        WHERE id = $1
        RETURNING {}
        "#,
        TEAM_COLUMNS
    ))
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.short_name)
    .bind(&team.country)
    .bind(team.founded)
    .bind(&team.stadium)
    .bind(team.stadium_capacity)
    .bind(&team.manager)
    .fetch_one(executor)
    .await
}

/// Returns the number of deleted rows (0 or 1).
pub async fn delete_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn team_has_matches<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM matches WHERE home_team_id = $1 OR away_team_id = $1)",
    )
    .bind(team_id)
    .fetch_one(executor)
    .await
}
