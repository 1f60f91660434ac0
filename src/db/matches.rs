use sqlx::PgExecutor;

use crate::models::matches::{Match, MatchCreate, MatchStatus};

const MATCH_COLUMNS: &str = "id, home_team_id, away_team_id, match_date, competition, season, \
     matchday, home_goals, away_goals, xg_home, xg_away, status, external_id";

pub async fn list_matches<'e>(
    executor: impl PgExecutor<'e>,
    skip: i64,
    limit: i64,
    team_id: Option<i64>,
    season: Option<&str>,
    status: Option<MatchStatus>,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        r#"
        SELECT {}
        FROM matches
        WHERE ($1::BIGINT IS NULL OR home_team_id = $1 OR away_team_id = $1)
          AND ($2::TEXT IS NULL OR season = $2)
          AND ($3::TEXT IS NULL OR status = $3)
        ORDER BY match_date DESC, id
        OFFSET $4 LIMIT $5
        "#,
        MATCH_COLUMNS
    ))
    .bind(team_id)
    .bind(season)
    .bind(status.map(|s| s.as_str()))
    .bind(skip)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn find_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS))
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_match_for_update<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        "SELECT {} FROM matches WHERE id = $1 FOR UPDATE",
        MATCH_COLUMNS
    ))
    .bind(match_id)
    .fetch_optional(executor)
    .await
}

pub async fn match_exists<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM matches WHERE id = $1)")
        .bind(match_id)
        .fetch_one(executor)
        .await
}

pub async fn insert_match<'e>(
    executor: impl PgExecutor<'e>,
    fixture: &MatchCreate,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        r#"
        INSERT INTO matches (home_team_id, away_team_id, match_date, competition, season,
                             matchday, home_goals, away_goals, xg_home, xg_away, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {}
        "#,
        MATCH_COLUMNS
    ))
    .bind(fixture.home_team_id)
    .bind(fixture.away_team_id)
    .bind(fixture.match_date)
    .bind(&fixture.competition)
    .bind(&fixture.season)
    .bind(fixture.matchday)
    .bind(fixture.home_goals)
    .bind(fixture.away_goals)
    .bind(fixture.xg_home)
    .bind(fixture.xg_away)
    .bind(fixture.status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn update_match<'e>(
    executor: impl PgExecutor<'e>,
    fixture: &Match,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(&format!(
        r#"
        UPDATE matches
        SET home_team_id = $2, away_team_id = $3, match_date = $4, competition = $5,
            season = $6, matchday = $7, home_goals = $8, away_goals = $9,
            xg_home = $10, xg_away = $11, status = $12
        WHERE id = $1
        RETURNING {}
        "#,
        MATCH_COLUMNS
    ))
    .bind(fixture.id)
    .bind(fixture.home_team_id)
    .bind(fixture.away_team_id)
    .bind(fixture.match_date)
    .bind(&fixture.competition)
    .bind(&fixture.season)
    .bind(fixture.matchday)
    .bind(fixture.home_goals)
    .bind(fixture.away_goals)
    .bind(fixture.xg_home)
    .bind(fixture.xg_away)
    .bind(fixture.status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn delete_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = $1")
        .bind(match_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
