use sqlx::PgExecutor;

use crate::models::player::{Player, PlayerCreate};

const PLAYER_COLUMNS: &str =
    "id, name, team_id, position, nationality, age, shirt_number, market_value_eur, external_id";

pub async fn list_players<'e>(
    executor: impl PgExecutor<'e>,
    skip: i64,
    limit: i64,
    team_id: Option<i64>,
    name: Option<&str>,
) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        r#"
        SELECT {}
        FROM players
        WHERE ($1::BIGINT IS NULL OR team_id = $1)
          AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')
        ORDER BY id
        OFFSET $3 LIMIT $4
        "#,
        PLAYER_COLUMNS
    ))
    .bind(team_id)
    .bind(name)
    .bind(skip)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn find_player<'e>(
    executor: impl PgExecutor<'e>,
    player_id: i64,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!("SELECT {} FROM players WHERE id = $1", PLAYER_COLUMNS))
        .bind(player_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_player_for_update<'e>(
    executor: impl PgExecutor<'e>,
    player_id: i64,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        "SELECT {} FROM players WHERE id = $1 FOR UPDATE",
        PLAYER_COLUMNS
    ))
    .bind(player_id)
    .fetch_optional(executor)
    .await
}

pub async fn player_exists<'e>(
    executor: impl PgExecutor<'e>,
    player_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM players WHERE id = $1)")
        .bind(player_id)
        .fetch_one(executor)
        .await
}

pub async fn insert_player<'e>(
    executor: impl PgExecutor<'e>,
    player: &PlayerCreate,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        r#"
        INSERT INTO players (name, team_id, position, nationality, age, shirt_number, market_value_eur)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        PLAYER_COLUMNS
    ))
    .bind(&player.name)
    .bind(player.team_id)
    .bind(&player.position)
    .bind(&player.nationality)
    .bind(player.age)
    .bind(player.shirt_number)
    .bind(player.market_value_eur)
    .fetch_one(executor)
    .await
}

pub async fn update_player<'e>(
    executor: impl PgExecutor<'e>,
    player: &Player,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(&format!(
        r#"
        UPDATE players
        SET name = $2, team_id = $3, position = $4, nationality = $5,
            age = $6, shirt_number = $7, market_value_eur = $8
        WHERE id = $1
        RETURNING {}
        "#,
        PLAYER_COLUMNS
    ))
    .bind(player.id)
    .bind(&player.name)
    .bind(player.team_id)
    .bind(&player.position)
    .bind(&player.nationality)
    .bind(player.age)
    .bind(player.shirt_number)
    .bind(player.market_value_eur)
    .fetch_one(executor)
    .await
}

pub async fn delete_player<'e>(
    executor: impl PgExecutor<'e>,
    player_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM players WHERE id = $1")
        .bind(player_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
