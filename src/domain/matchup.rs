use super::Period;
use serde::{Deserialize, Serialize};

/// One team's standing line inside a weekly matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupSide {
    pub team: String,
    pub owner: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub rank: u32,
    pub streak: String,
    pub waiver: u32,
    pub fantasy_pts: f64,
}

/// A home/away pairing for one week. Repeats are legitimate, so there is no
/// identity beyond the pair and its period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub home: MatchupSide,
    pub away: MatchupSide,
    pub year: i32,
    pub week: u32,
}

impl MatchupRecord {
    pub fn period(&self) -> Period {
        Period::new(self.year, self.week)
    }
}
