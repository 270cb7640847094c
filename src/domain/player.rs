use super::Period;
use serde::{Deserialize, Serialize};

pub const FREE_AGENT: &str = "Free";

/// The thirteen weekly stat columns, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    YdsPassing,
    TdPassing,
    IntPassing,
    YdsRushing,
    TdRushing,
    YdsReceiving,
    TdReceiving,
    YdsReturn,
    TdReturn,
    FumTdMisc,
    TwoPtMisc,
    LostFum,
    FantasyPts,
}

impl StatField {
    pub const ALL: [StatField; 13] = [
        StatField::YdsPassing,
        StatField::TdPassing,
        StatField::IntPassing,
        StatField::YdsRushing,
        StatField::TdRushing,
        StatField::YdsReceiving,
        StatField::TdReceiving,
        StatField::YdsReturn,
        StatField::TdReturn,
        StatField::FumTdMisc,
        StatField::TwoPtMisc,
        StatField::LostFum,
        StatField::FantasyPts,
    ];

    pub fn column(self) -> &'static str {
        match self {
            StatField::YdsPassing => "yds_passing",
            StatField::TdPassing => "td_passing",
            StatField::IntPassing => "int_passing",
            StatField::YdsRushing => "yds_rushing",
            StatField::TdRushing => "td_rushing",
            StatField::YdsReceiving => "yds_receiving",
            StatField::TdReceiving => "td_receiving",
            StatField::YdsReturn => "yds_return",
            StatField::TdReturn => "td_return",
            StatField::FumTdMisc => "fumtd_misc",
            StatField::TwoPtMisc => "two_pt_misc",
            StatField::LostFum => "lost_fum",
            StatField::FantasyPts => "fantasy_pts",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub yds_passing: f64,
    pub td_passing: f64,
    pub int_passing: f64,
    pub yds_rushing: f64,
    pub td_rushing: f64,
    pub yds_receiving: f64,
    pub td_receiving: f64,
    pub yds_return: f64,
    pub td_return: f64,
    pub fumtd_misc: f64,
    pub two_pt_misc: f64,
    pub lost_fum: f64,
    pub fantasy_pts: f64,
}

impl StatLine {
    pub fn get(&self, field: StatField) -> f64 {
        match field {
            StatField::YdsPassing => self.yds_passing,
            StatField::TdPassing => self.td_passing,
            StatField::IntPassing => self.int_passing,
            StatField::YdsRushing => self.yds_rushing,
            StatField::TdRushing => self.td_rushing,
            StatField::YdsReceiving => self.yds_receiving,
            StatField::TdReceiving => self.td_receiving,
            StatField::YdsReturn => self.yds_return,
            StatField::TdReturn => self.td_return,
            StatField::FumTdMisc => self.fumtd_misc,
            StatField::TwoPtMisc => self.two_pt_misc,
            StatField::LostFum => self.lost_fum,
            StatField::FantasyPts => self.fantasy_pts,
        }
    }

    pub fn set(&mut self, field: StatField, value: f64) {
        let slot = match field {
            StatField::YdsPassing => &mut self.yds_passing,
            StatField::TdPassing => &mut self.td_passing,
            StatField::IntPassing => &mut self.int_passing,
            StatField::YdsRushing => &mut self.yds_rushing,
            StatField::TdRushing => &mut self.td_rushing,
            StatField::YdsReceiving => &mut self.yds_receiving,
            StatField::TdReceiving => &mut self.td_receiving,
            StatField::YdsReturn => &mut self.yds_return,
            StatField::TdReturn => &mut self.td_return,
            StatField::FumTdMisc => &mut self.fumtd_misc,
            StatField::TwoPtMisc => &mut self.two_pt_misc,
            StatField::LostFum => &mut self.lost_fum,
            StatField::FantasyPts => &mut self.fantasy_pts,
        };
        *slot = value;
    }

    pub fn values(&self) -> [f64; 13] {
        StatField::ALL.map(|field| self.get(field))
    }
}

/// One player's line for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWeekStat {
    pub name: String,
    pub position: String,
    pub team: String,
    pub opponent: String,
    #[serde(flatten)]
    pub stats: StatLine,
    pub year: i32,
    pub week: u32,
}

impl PlayerWeekStat {
    pub fn period(&self) -> Period {
        Period::new(self.year, self.week)
    }

    pub fn is_free_agent(&self) -> bool {
        self.team == FREE_AGENT
    }
}
