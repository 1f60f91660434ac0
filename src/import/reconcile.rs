//! Mapping and de-duplication of dataset records onto the store.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::config::settings::ImportSettings;
use crate::import::source::{self, ExternalMatch, ExternalPlayer, ExternalTeam};
use crate::import::store::{ImportStore, NewMatch, NewPlayer, NewTeam, StoreTotals};
use crate::import::ImportError;
use crate::models::matches::MatchStatus;

/// Dataset `team_api_id` to internal team id.
pub type TeamIdMap = HashMap<i64, i64>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub imported: usize,
    pub skipped: usize,
}

/// Why a record was left out of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyImported,
    UnknownHomeTeam(i64),
    UnknownAwayTeam(i64),
    MalformedDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyImported => write!(f, "already imported"),
            SkipReason::UnknownHomeTeam(id) => write!(f, "home team {} was not imported", id),
            SkipReason::UnknownAwayTeam(id) => write!(f, "away team {} was not imported", id),
            SkipReason::MalformedDate => write!(f, "missing or malformed date"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub reference_year: i32,
    /// Imported matches per commit. Zero commits only once, at the end.
    pub commit_every: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            reference_year: 2016,
            commit_every: 500,
        }
    }
}

impl From<&ImportSettings> for ImportOptions {
    fn from(settings: &ImportSettings) -> Self {
        Self {
            reference_year: settings.reference_year,
            commit_every: settings.commit_every,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub teams: TableCounts,
    pub players: TableCounts,
    pub matches: TableCounts,
    pub totals: StoreTotals,
}

fn record_skip(table: &str, external_id: i64, reason: SkipReason, counts: &mut TableCounts) {
    tracing::debug!("Skipping {} {}: {}", table, external_id, reason);
    counts.skipped += 1;
}

/// Age in `reference_year` from a `YYYY...` birthday. `None` when the
/// prefix is not a year or lies after the reference year.
pub fn age_from_birthday(birthday: &str, reference_year: i32) -> Option<i32> {
    let year = birthday.get(..4)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let age = reference_year - year.parse::<i32>().ok()?;
    (age >= 0).then_some(age)
}

/// Calendar date from the first ten characters, `YYYY-MM-DD`.
pub fn parse_match_date(date: &str) -> Option<NaiveDate> {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Teams already present, by external id or by name, are reused rather
/// than inserted. Returns the id mapping needed for matches.
pub async fn import_teams<S: ImportStore>(
    store: &mut S,
    teams: &[ExternalTeam],
) -> Result<(TableCounts, TeamIdMap), sqlx::Error> {
    let mut counts = TableCounts::default();
    let mut ids = TeamIdMap::with_capacity(teams.len());

    for team in teams {
        if let Some(id) = store.find_team(team.team_api_id, &team.team_long_name).await? {
            ids.insert(team.team_api_id, id);
            record_skip("team", team.team_api_id, SkipReason::AlreadyImported, &mut counts);
            continue;
        }

        let id = store
            .insert_team(&NewTeam {
                name: team.team_long_name.clone(),
                short_name: team.team_short_name.clone(),
                external_id: team.team_api_id,
            })
            .await?;
        ids.insert(team.team_api_id, id);
        counts.imported += 1;
    }

    store.commit().await?;
    tracing::info!("Teams: {} imported, {} skipped", counts.imported, counts.skipped);
    Ok((counts, ids))
}

pub async fn import_players<S: ImportStore>(
    store: &mut S,
    players: &[ExternalPlayer],
    options: &ImportOptions,
) -> Result<TableCounts, sqlx::Error> {
    let mut counts = TableCounts::default();

    for player in players {
        if store.player_imported(player.player_api_id).await? {
            record_skip("player", player.player_api_id, SkipReason::AlreadyImported, &mut counts);
            continue;
        }

        let age = player
            .birthday
            .as_deref()
            .and_then(|b| age_from_birthday(b, options.reference_year));
        store
            .insert_player(&NewPlayer {
                name: player.player_name.clone(),
                age,
                external_id: player.player_api_id,
            })
            .await?;
        counts.imported += 1;
    }

    store.commit().await?;
    tracing::info!("Players: {} imported, {} skipped", counts.imported, counts.skipped);
    Ok(counts)
}

fn resolve_teams(fixture: &ExternalMatch, ids: &TeamIdMap) -> Result<(i64, i64), SkipReason> {
    let home = ids
        .get(&fixture.home_team_api_id)
        .ok_or(SkipReason::UnknownHomeTeam(fixture.home_team_api_id))?;
    let away = ids
        .get(&fixture.away_team_api_id)
        .ok_or(SkipReason::UnknownAwayTeam(fixture.away_team_api_id))?;
    Ok((*home, *away))
}

/// Finished fixtures whose teams both resolve through `ids`. Commits every
/// `commit_every` inserts and once more at the end.
pub async fn import_matches<S: ImportStore>(
    store: &mut S,
    matches: &[ExternalMatch],
    ids: &TeamIdMap,
    options: &ImportOptions,
) -> Result<TableCounts, sqlx::Error> {
    let mut counts = TableCounts::default();

    for fixture in matches {
        let (home_team_id, away_team_id) = match resolve_teams(fixture, ids) {
            Ok(teams) => teams,
            Err(reason) => {
                record_skip("match", fixture.match_api_id, reason, &mut counts);
                continue;
            }
        };

        if store.match_imported(fixture.match_api_id).await? {
            record_skip("match", fixture.match_api_id, SkipReason::AlreadyImported, &mut counts);
            continue;
        }

        let Some(match_date) = fixture.date.as_deref().and_then(parse_match_date) else {
            record_skip("match", fixture.match_api_id, SkipReason::MalformedDate, &mut counts);
            continue;
        };

        store
            .insert_match(&NewMatch {
                external_id: fixture.match_api_id,
                home_team_id,
                away_team_id,
                match_date,
                competition: fixture.league_name.clone(),
                season: fixture.season.clone(),
                matchday: fixture.stage,
                home_goals: fixture.home_team_goal,
                away_goals: fixture.away_team_goal,
                status: MatchStatus::Finished,
            })
            .await?;
        counts.imported += 1;

        if options.commit_every > 0 && counts.imported % options.commit_every == 0 {
            store.commit().await?;
            tracing::info!("Matches: {} imported so far", counts.imported);
        }
    }

    store.commit().await?;
    tracing::info!("Matches: {} imported, {} skipped", counts.imported, counts.skipped);
    Ok(counts)
}

async fn import_all<S: ImportStore>(
    source: &SqlitePool,
    store: &mut S,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let teams = source::load_teams(source).await.map_err(ImportError::Source)?;
    tracing::info!("Importing {} teams", teams.len());
    let (team_counts, ids) = import_teams(store, &teams).await.map_err(ImportError::Store)?;

    let players = source::load_players(source).await.map_err(ImportError::Source)?;
    tracing::info!("Importing {} players", players.len());
    let player_counts = import_players(store, &players, options)
        .await
        .map_err(ImportError::Store)?;

    let matches = source::load_matches(source).await.map_err(ImportError::Source)?;
    tracing::info!("Importing {} finished matches", matches.len());
    let match_counts = import_matches(store, &matches, &ids, options)
        .await
        .map_err(ImportError::Store)?;

    let totals = store.totals().await.map_err(ImportError::Store)?;
    Ok(ImportSummary {
        teams: team_counts,
        players: player_counts,
        matches: match_counts,
        totals,
    })
}

/// Run teams, players and matches in order. On failure the open batch is
/// rolled back before the error is returned; earlier commits stay.
#[tracing::instrument(name = "Import dataset", skip(source, store))]
pub async fn run_import<S: ImportStore>(
    source: &SqlitePool,
    store: &mut S,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    match import_all(source, store, options).await {
        Ok(summary) => {
            tracing::info!(
                "Import finished: {} teams, {} players, {} matches in store",
                summary.totals.teams,
                summary.totals.players,
                summary.totals.matches
            );
            Ok(summary)
        }
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            if let Err(rollback_err) = store.rollback().await {
                tracing::error!("Rollback failed: {:?}", rollback_err);
            }
            Err(e)
        }
    }
}
