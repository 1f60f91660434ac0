use sqlx::PgExecutor;

use crate::models::player_stat::{PlayerStat, PlayerStatCreate};

const STAT_COLUMNS: &str = "id, player_id, match_id, goals, assists, minutes_played, yellow_cards, \
     red_cards, shots, shots_on_target, passes, pass_accuracy, rating";

pub async fn find_stat<'e>(
    executor: impl PgExecutor<'e>,
    stat_id: i64,
) -> Result<Option<PlayerStat>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(&format!(
        "SELECT {} FROM player_stats WHERE id = $1",
        STAT_COLUMNS
    ))
    .bind(stat_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_stat_for_update<'e>(
    executor: impl PgExecutor<'e>,
    stat_id: i64,
) -> Result<Option<PlayerStat>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(&format!(
        "SELECT {} FROM player_stats WHERE id = $1 FOR UPDATE",
        STAT_COLUMNS
    ))
    .bind(stat_id)
    .fetch_optional(executor)
    .await
}

pub async fn stats_for_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i64,
) -> Result<Vec<PlayerStat>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(&format!(
        "SELECT {} FROM player_stats WHERE match_id = $1 ORDER BY id",
        STAT_COLUMNS
    ))
    .bind(match_id)
    .fetch_all(executor)
    .await
}

pub async fn stats_for_player<'e>(
    executor: impl PgExecutor<'e>,
    player_id: i64,
) -> Result<Vec<PlayerStat>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(
        r#"
        SELECT s.id, s.player_id, s.match_id, s.goals, s.assists, s.minutes_played,
               s.yellow_cards, s.red_cards, s.shots, s.shots_on_target, s.passes,
               s.pass_accuracy, s.rating
        FROM player_stats s
        JOIN matches m ON m.id = s.match_id
        WHERE s.player_id = $1
        ORDER BY m.match_date DESC, s.id
        "#,
    )
    .bind(player_id)
    .fetch_all(executor)
    .await
}

pub async fn insert_stat<'e>(
    executor: impl PgExecutor<'e>,
    stat: &PlayerStatCreate,
) -> Result<PlayerStat, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(&format!(
        r#"
        INSERT INTO player_stats (player_id, match_id, goals, assists, minutes_played,
                                  yellow_cards, red_cards, shots, shots_on_target, passes,
                                  pass_accuracy, rating)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {}
        "#,
        STAT_COLUMNS
    ))
    .bind(stat.player_id)
    .bind(stat.match_id)
    .bind(stat.goals)
    .bind(stat.assists)
    .bind(stat.minutes_played)
    .bind(stat.yellow_cards)
    .bind(stat.red_cards)
    .bind(stat.shots)
    .bind(stat.shots_on_target)
    .bind(stat.passes)
    .bind(stat.pass_accuracy)
    .bind(stat.rating)
    .fetch_one(executor)
    .await
}

pub async fn update_stat<'e>(
    executor: impl PgExecutor<'e>,
    stat: &PlayerStat,
) -> Result<PlayerStat, sqlx::Error> {
    sqlx::query_as::<_, PlayerStat>(&format!(
        r#"
        UPDATE player_stats
        SET goals = $2, assists = $3, minutes_played = $4, yellow_cards = $5,
            red_cards = $6, shots = $7, shots_on_target = $8, passes = $9,
            pass_accuracy = $10, rating = $11
        WHERE id = $1
        RETURNING {}
        "#,
        STAT_COLUMNS
    ))
    .bind(stat.id)
    .bind(stat.goals)
    .bind(stat.assists)
    .bind(stat.minutes_played)
    .bind(stat.yellow_cards)
    .bind(stat.red_cards)
    .bind(stat.shots)
    .bind(stat.shots_on_target)
    .bind(stat.passes)
    .bind(stat.pass_accuracy)
    .bind(stat.rating)
    .fetch_one(executor)
    .await
}

pub async fn delete_stat<'e>(
    executor: impl PgExecutor<'e>,
    stat_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM player_stats WHERE id = $1")
        .bind(stat_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
