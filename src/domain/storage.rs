use super::{MatchupRecord, Period, PlayerWeekStat};
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    /// Latest stored period of `table`, or `None` when nothing is stored yet.
    fn last_period(&self, table: RecordTable) -> Result<Option<Period>>;
    fn append_player_stats(&self, rows: &[PlayerWeekStat]) -> Result<usize>;
    fn append_matchups(&self, rows: &[MatchupRecord]) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RecordTable {
    Players,
    Matchups,
}

impl RecordTable {
    pub fn name(self) -> &'static str {
        match self {
            RecordTable::Players => StorageKeys::PLAYER_STATS,
            RecordTable::Matchups => StorageKeys::MATCHUPS,
        }
    }
}

pub struct StorageKeys;

impl StorageKeys {
    pub const PLAYER_STATS: &'static str = "player_stats";
    pub const MATCHUPS: &'static str = "matchups";
}
