use crate::domain::{MatchupRecord, Period, PlayerWeekStat};
use crate::error::Result;
use crate::infrastructure::{
    LeagueUrls, MatchupListExtractor, PageExtractor, PageFetcher, PlayerTableExtractor, Session,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rows per page of the player listing.
pub const PAGE_SIZE: u32 = 25;

pub struct ScrapingService {
    fetcher: Arc<dyn PageFetcher>,
    urls: LeagueUrls,
    players: PlayerTableExtractor,
    matchups: MatchupListExtractor,
}

impl ScrapingService {
    pub fn new(fetcher: Arc<dyn PageFetcher + 'static>, urls: LeagueUrls) -> Self {
        info!("Created new Scraping service");
        Self {
            fetcher,
            urls,
            players: PlayerTableExtractor::default(),
            matchups: MatchupListExtractor,
        }
    }

    /// Walks the paginated player listing for one week until a page comes
    /// back without a table.
    pub async fn player_period(
        &self,
        period: Period,
        session: &Session,
    ) -> Result<Vec<PlayerWeekStat>> {
        info!("Pulling player stats for week {} season {}", period.week, period.year);

        let mut rows = Vec::new();
        let mut offset = 0;

        loop {
            let url = self.urls.players(offset, period);
            let page = self.fetcher.fetch(&url, session).await?;

            let Some(batch) = self.players.extract(&page, period)? else {
                break;
            };

            debug!("Offset {} returned {} rows", offset, batch.len());
            rows.extend(batch);
            offset += PAGE_SIZE;
        }

        Ok(rows)
    }

    /// Fetches the weekly schedule page. A page without a matchup section
    /// yields no records.
    pub async fn matchup_period(
        &self,
        period: Period,
        session: &Session,
    ) -> Result<Vec<MatchupRecord>> {
        info!("Pulling matchups for week {} season {}", period.week, period.year);

        let page = self
            .fetcher
            .fetch(&self.urls.schedule(period), session)
            .await?;

        match self.matchups.extract(&page, period)? {
            Some(records) => {
                debug!("Found {} matchups", records.len());
                Ok(records)
            }
            None => {
                warn!(
                    "No matchup section for week {} season {}",
                    period.week, period.year
                );
                Ok(Vec::new())
            }
        }
    }
}
