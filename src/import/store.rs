//! Write side of the importer.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::matches::MatchStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub name: String,
    pub short_name: Option<String>,
    pub external_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub age: Option<i32>,
    pub external_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub external_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_date: NaiveDate,
    pub competition: Option<String>,
    pub season: Option<String>,
    pub matchday: Option<i32>,
    pub home_goals: i32,
    pub away_goals: i32,
    pub status: MatchStatus,
}

/// Row counts per table after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreTotals {
    pub teams: i64,
    pub players: i64,
    pub matches: i64,
}

/// Persistence the importer needs. Writes accumulate until `commit`;
/// `rollback` discards everything since the last commit.
#[allow(async_fn_in_trait)]
pub trait ImportStore {
    /// Internal id of a team matching either key.
    async fn find_team(&mut self, external_id: i64, name: &str) -> Result<Option<i64>, sqlx::Error>;
    async fn insert_team(&mut self, team: &NewTeam) -> Result<i64, sqlx::Error>;
    async fn player_imported(&mut self, external_id: i64) -> Result<bool, sqlx::Error>;
    async fn insert_player(&mut self, player: &NewPlayer) -> Result<(), sqlx::Error>;
    async fn match_imported(&mut self, external_id: i64) -> Result<bool, sqlx::Error>;
    async fn insert_match(&mut self, fixture: &NewMatch) -> Result<(), sqlx::Error>;
    async fn commit(&mut self) -> Result<(), sqlx::Error>;
    async fn rollback(&mut self) -> Result<(), sqlx::Error>;
    async fn totals(&mut self) -> Result<StoreTotals, sqlx::Error>;
}

/// Postgres store holding at most one open transaction, started lazily.
pub struct PgImportStore {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgImportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, tx: None }
    }

    async fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, sqlx::Error> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.tx.insert(tx))
    }
}

impl ImportStore for PgImportStore {
    async fn find_team(&mut self, external_id: i64, name: &str) -> Result<Option<i64>, sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query_scalar::<_, i64>(
            "SELECT id FROM teams WHERE external_id = $1 OR name = $2 ORDER BY id LIMIT 1",
        )
        .bind(external_id)
        .bind(name)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn insert_team(&mut self, team: &NewTeam) -> Result<i64, sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO teams (name, short_name, external_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&team.name)
        .bind(&team.short_name)
        .bind(team.external_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn player_imported(&mut self, external_id: i64) -> Result<bool, sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM players WHERE external_id = $1)")
            .bind(external_id)
            .fetch_one(&mut **tx)
            .await
    }

    async fn insert_player(&mut self, player: &NewPlayer) -> Result<(), sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query("INSERT INTO players (name, age, external_id) VALUES ($1, $2, $3)")
            .bind(&player.name)
            .bind(player.age)
            .bind(player.external_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn match_imported(&mut self, external_id: i64) -> Result<bool, sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM matches WHERE external_id = $1)")
            .bind(external_id)
            .fetch_one(&mut **tx)
            .await
    }

    async fn insert_match(&mut self, fixture: &NewMatch) -> Result<(), sqlx::Error> {
        let tx = self.tx().await?;
        sqlx::query(
            r#"
            INSERT INTO matches (external_id, home_team_id, away_team_id, match_date,
                                 competition, season, matchday, home_goals, away_goals, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(fixture.external_id)
        .bind(fixture.home_team_id)
        .bind(fixture.away_team_id)
        .bind(fixture.match_date)
        .bind(&fixture.competition)
        .bind(&fixture.season)
        .bind(fixture.matchday)
        .bind(fixture.home_goals)
        .bind(fixture.away_goals)
        .bind(fixture.status.as_str())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }

    async fn totals(&mut self) -> Result<StoreTotals, sqlx::Error> {
        let (teams, players, matches) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM teams),
                (SELECT COUNT(*) FROM players),
                (SELECT COUNT(*) FROM matches)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(StoreTotals { teams, players, matches })
    }
}
