mod manifest;
mod matchup;
mod period;
mod player;
pub(crate) mod storage;

pub use manifest::{Manifest, PullRange};
pub use matchup::{MatchupRecord, MatchupSide};
pub use period::{Period, PeriodWalker};
pub use player::{PlayerWeekStat, StatField, StatLine, FREE_AGENT};
