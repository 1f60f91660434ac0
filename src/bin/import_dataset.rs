use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use footballiq_backend::config::settings::get_config;
use footballiq_backend::import::{run_import, source, ImportOptions, PgImportStore, TableCounts};
use footballiq_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = get_config().context("failed to read configuration")?;

    let subscriber = get_subscriber(
        "import-dataset".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let source_path = parse_source_arg().unwrap_or_else(|| config.import.source_path.clone());
    if !source_path.is_file() {
        return Err(anyhow!("source dataset not found at {}", source_path.display()));
    }

    let mut options = ImportOptions::from(&config.import);
    if let Some(year) = parse_reference_year_arg()? {
        options.reference_year = year;
    }

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.database.connection_string().expose_secret())
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let source = source::open_source(&source_path)
        .await
        .with_context(|| format!("failed to open {}", source_path.display()))?;

    let mut store = PgImportStore::new(pool);
    let summary = run_import(&source, &mut store, &options).await?;

    println!("Import complete");
    println!("Source: {}", source_path.display());
    print_counts("Teams", summary.teams);
    print_counts("Players", summary.players);
    print_counts("Matches", summary.matches);
    println!(
        "Store totals: teams={} players={} matches={}",
        summary.totals.teams, summary.totals.players, summary.totals.matches
    );

    Ok(())
}

fn print_counts(label: &str, counts: TableCounts) {
    println!("{label}: imported={} skipped={}", counts.imported, counts.skipped);
}

/// Value of `--name=value` or `--name value`.
fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg.strip_prefix("--") == Some(name) {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn parse_source_arg() -> Option<PathBuf> {
    arg_value("source").map(PathBuf::from)
}

fn parse_reference_year_arg() -> Result<Option<i32>> {
    arg_value("reference-year")
        .map(|raw| {
            raw.parse::<i32>()
                .with_context(|| format!("invalid --reference-year: {raw}"))
        })
        .transpose()
}
