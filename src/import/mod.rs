//! Offline import of the European Soccer Database (SQLite) into Postgres.
//!
//! Tables are processed in dependency order, teams → players → matches.
//! Every insert is preceded by an existence check on the external key, so a
//! full re-run adds nothing. A record that cannot be mapped is skipped and
//! counted; any database failure aborts the run after rolling back the
//! uncommitted batch.

pub mod reconcile;
pub mod source;
pub mod store;

pub use reconcile::{
    age_from_birthday, import_matches, import_players, import_teams, parse_match_date, run_import,
    ImportOptions, ImportSummary, SkipReason, TableCounts, TeamIdMap,
};
pub use source::{ExternalMatch, ExternalPlayer, ExternalTeam};
pub use store::{ImportStore, NewMatch, NewPlayer, NewTeam, PgImportStore, StoreTotals};

/// Fatal import failure. Per-record problems never end up here.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read the source dataset: {0}")]
    Source(#[source] sqlx::Error),
    #[error("Failed to write to the store: {0}")]
    Store(#[source] sqlx::Error),
}
