use crate::config::cli::Command;
use crate::config::Config;
use crate::domain::storage::Storage;
use crate::error::Result;
use crate::infrastructure::{FileSystemStore, LeagueUrls, NflClient, SqliteStore};
use crate::services::{
    CheckpointResolver, PullRequest, PullService, PullSettings, PullSummary, ScrapingService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.args.log_level)),
        )
        .init();

    config.ensure_directories()?;
    let store: Arc<dyn Storage> = Arc::new(SqliteStore::open(&config.args.database)?);

    match &config.args.command {
        Command::Checkpoint { table } => {
            match CheckpointResolver::new(store).last_period(*table)? {
                Some(period) => println!("{period}"),
                None => println!("no {} stored yet", table.name()),
            }
        }
        Command::Players(range) => {
            let request = PullRequest {
                start: range.start,
                end: range.end,
                resume: range.resume,
                first_season_only: false,
            };
            let summary = build_pull_service(&config, store)?
                .pull_players(request)
                .await?;
            report("players", &summary);
        }
        Command::League {
            range,
            first_season_only,
        } => {
            let request = PullRequest {
                start: range.start,
                end: range.end,
                resume: range.resume,
                first_season_only: *first_season_only,
            };
            let summary = build_pull_service(&config, store)?
                .pull_league(request)
                .await?;
            report("league", &summary);
        }
    }

    Ok(())
}

fn build_pull_service(config: &Config, store: Arc<dyn Storage>) -> Result<PullService> {
    let league = config.league()?;
    let client = Arc::new(NflClient::new(
        config.http_client.clone(),
        league.login_host.clone(),
    ));
    let scraping = ScrapingService::new(
        client.clone(),
        LeagueUrls::new(league.host.clone(), league.league_id.clone()),
    );
    let exporter = config
        .args
        .export_json
        .then(|| FileSystemStore::new(config.args.data_dir.clone()));

    Ok(PullService::new(
        PullSettings {
            league_id: league.league_id.clone(),
            season_weeks: league.season_weeks,
            history_start: league.history_start,
        },
        config.credentials()?,
        store,
        client,
        scraping,
        exporter,
    ))
}

fn report(kind: &str, summary: &PullSummary) {
    match summary.range {
        Some(range) => info!(
            "{} pull completed: {} periods ({} to {}), {} rows stored",
            kind, summary.periods, range.start, range.end, summary.stored
        ),
        None => info!("{} pull completed: already up to date", kind),
    }
    if let Some(path) = &summary.export {
        info!("Export written to {}", path.display());
    }
}
