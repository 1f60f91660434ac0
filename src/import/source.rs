//! Readers for the external SQLite dataset.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExternalTeam {
    pub team_api_id: i64,
    pub team_long_name: String,
    pub team_short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExternalPlayer {
    pub player_api_id: i64,
    pub player_name: String,
    /// e.g. `1992-02-29 00:00:00`
    pub birthday: Option<String>,
}

/// A finished fixture. Rows without a final score never leave the query.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ExternalMatch {
    pub match_api_id: i64,
    pub season: Option<String>,
    pub stage: Option<i32>,
    pub date: Option<String>,
    pub home_team_api_id: i64,
    pub away_team_api_id: i64,
    pub home_team_goal: i32,
    pub away_team_goal: i32,
    pub league_name: Option<String>,
}

/// Open the dataset read-only.
pub async fn open_source(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

pub async fn load_teams(source: &SqlitePool) -> Result<Vec<ExternalTeam>, sqlx::Error> {
    sqlx::query_as::<_, ExternalTeam>(
        "SELECT team_api_id, team_long_name, team_short_name FROM Team ORDER BY id",
    )
    .fetch_all(source)
    .await
}

pub async fn load_players(source: &SqlitePool) -> Result<Vec<ExternalPlayer>, sqlx::Error> {
    sqlx::query_as::<_, ExternalPlayer>(
        "SELECT player_api_id, player_name, birthday FROM Player ORDER BY id",
    )
    .fetch_all(source)
    .await
}

pub async fn load_matches(source: &SqlitePool) -> Result<Vec<ExternalMatch>, sqlx::Error> {
    sqlx::query_as::<_, ExternalMatch>(
        r#"
        SELECT
            m.match_api_id,
            m.season,
            m.stage,
            m.date,
            m.home_team_api_id,
            m.away_team_api_id,
            m.home_team_goal,
            m.away_team_goal,
            l.name AS league_name
        FROM Match m
        JOIN League l ON m.league_id = l.id
        WHERE m.home_team_goal IS NOT NULL
          AND m.away_team_goal IS NOT NULL
        ORDER BY m.id
        "#,
    )
    .fetch_all(source)
    .await
}
