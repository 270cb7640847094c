use crate::domain::storage::{RecordTable, Storage, StorageKeys};
use crate::domain::{Manifest, MatchupRecord, Period, PeriodWalker, PullRange};
use crate::error::{PullError, Result};
use crate::infrastructure::{Credentials, FileSystemStore, SessionProvider};
use crate::services::{
    assembly::{Assembler, MatchupAssembler, PlayerAssembler},
    checkpoint::CheckpointResolver,
    scraping::ScrapingService,
};
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// League-wide values every pull needs.
#[derive(Debug, Clone)]
pub struct PullSettings {
    pub league_id: String,
    pub season_weeks: u32,
    pub history_start: Period,
}

/// One invocation of `players` or `league`.
#[derive(Debug, Clone, Copy)]
pub struct PullRequest {
    pub start: Option<Period>,
    pub end: Period,
    pub resume: bool,
    pub first_season_only: bool,
}

#[derive(Debug, Default)]
pub struct PullSummary {
    pub range: Option<PullRange>,
    pub periods: usize,
    pub stored: usize,
    pub export: Option<PathBuf>,
}

pub struct PullService {
    settings: PullSettings,
    credentials: Credentials,
    store: Arc<dyn Storage>,
    sessions: Arc<dyn SessionProvider>,
    scraping: ScrapingService,
    checkpoints: CheckpointResolver,
    exporter: Option<FileSystemStore>,
}

impl PullService {
    pub fn new(
        settings: PullSettings,
        credentials: Credentials,
        store: Arc<dyn Storage + 'static>,
        sessions: Arc<dyn SessionProvider + 'static>,
        scraping: ScrapingService,
        exporter: Option<FileSystemStore>,
    ) -> Self {
        Self {
            settings,
            credentials,
            checkpoints: CheckpointResolver::new(store.clone()),
            store,
            sessions,
            scraping,
            exporter,
        }
    }

    /// Pulls weekly player stats for every period of the request and appends
    /// the deduplicated table to the store.
    pub async fn pull_players(&self, request: PullRequest) -> Result<PullSummary> {
        let Some((walker, range)) = self.plan(RecordTable::Players, &request)? else {
            return Ok(PullSummary::default());
        };

        let session = self.sessions.login(&self.credentials).await?;
        info!("Logged in, pulling players {} to {}", range.start, range.end);

        let progress = progress_bar(walker.clone().count())?;
        let mut assembler = PlayerAssembler::default();
        let mut periods = 0;

        for period in walker {
            progress.set_message(format!("week {} season {}", period.week, period.year));
            let rows = self.scraping.player_period(period, &session).await?;
            assembler.extend(rows);
            periods += 1;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let fetched = assembler.len();
        let rows = assembler.finish();
        let free_agents = rows.iter().filter(|row| row.is_free_agent()).count();
        info!(
            "Assembled {} player rows from {} fetched ({} free agents)",
            rows.len(),
            fetched,
            free_agents
        );

        let stored = self.store.append_player_stats(&rows)?;

        let export = self.export(StorageKeys::PLAYER_STATS, range, rows)?;

        Ok(PullSummary {
            range: Some(range),
            periods,
            stored,
            export,
        })
    }

    /// Pulls weekly league matchups and appends them to the store.
    pub async fn pull_league(&self, request: PullRequest) -> Result<PullSummary> {
        let Some((walker, range)) = self.plan(RecordTable::Matchups, &request)? else {
            return Ok(PullSummary::default());
        };

        let session = self.sessions.login(&self.credentials).await?;
        info!("Logged in, pulling matchups {} to {}", range.start, range.end);

        let progress = progress_bar(walker.clone().count())?;
        let mut assembler = MatchupAssembler::default();
        let mut periods = 0;

        for period in walker {
            progress.set_message(format!("week {} season {}", period.week, period.year));
            let records = self.scraping.matchup_period(period, &session).await?;
            assembler.extend(records);
            periods += 1;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let records = assembler.finish();
        let weeks: FxHashSet<Period> = records.iter().map(MatchupRecord::period).collect();
        info!(
            "Assembled {} matchups covering {} of {} weeks",
            records.len(),
            weeks.len(),
            periods
        );

        let stored = self.store.append_matchups(&records)?;

        let export = self.export(StorageKeys::MATCHUPS, range, records)?;

        Ok(PullSummary {
            range: Some(range),
            periods,
            stored,
            export,
        })
    }

    /// Resolves the first period to pull and builds the walk. `None` when the
    /// range is empty, e.g. a resume point already past `end`.
    fn plan(
        &self,
        table: RecordTable,
        request: &PullRequest,
    ) -> Result<Option<(PeriodWalker, PullRange)>> {
        let fallback = request.start.unwrap_or(self.settings.history_start);
        let start = if request.resume {
            self.checkpoints
                .resume_from(table, self.settings.season_weeks)?
                .unwrap_or(fallback)
        } else {
            fallback
        };

        let mut walker = PeriodWalker::new(start, request.end, self.settings.season_weeks);
        if request.first_season_only {
            walker = walker.first_season_only();
        }

        let mut periods = walker.clone();
        let (Some(first), last) = (periods.next(), periods.last()) else {
            info!(
                "Nothing to pull for {}: {} is after {}",
                table.name(),
                start,
                request.end
            );
            return Ok(None);
        };

        let range = PullRange {
            start: first,
            end: last.unwrap_or(first),
        };
        Ok(Some((walker, range)))
    }

    fn export<T: Serialize>(
        &self,
        kind: &str,
        range: PullRange,
        rows: Vec<T>,
    ) -> Result<Option<PathBuf>> {
        let Some(exporter) = &self.exporter else {
            return Ok(None);
        };

        let manifest = Manifest::new(kind, &self.settings.league_id, range, rows);
        exporter.save_manifest(&manifest).map(Some)
    }
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| PullError::Other(e.to_string()))?,
    );
    Ok(pb)
}
