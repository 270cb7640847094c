use super::markup::{parse_element, Element};
use super::sanitize::table_fragment;
use super::PageExtractor;
use crate::domain::{Period, PlayerWeekStat, StatField, StatLine, FREE_AGENT};
use crate::error::Result;

/// Where each field of a player row lives, as child-index paths from the
/// `<tr>` element. A layout change on the portal only touches this table.
#[derive(Debug)]
pub struct PlayerRowLayout {
    pub name: &'static [usize],
    pub position_team: &'static [usize],
    pub opponent: &'static [usize],
    pub stats: [(StatField, &'static [usize]); 13],
}

impl PlayerRowLayout {
    /// Weekly stats listing (`statType=weekStats`).
    pub const WEEK_STATS: PlayerRowLayout = PlayerRowLayout {
        name: &[1, 0, 1],
        position_team: &[1, 0, 2],
        opponent: &[2],
        stats: [
            (StatField::YdsPassing, &[4, 0]),
            (StatField::TdPassing, &[5, 0]),
            (StatField::IntPassing, &[6, 0]),
            (StatField::YdsRushing, &[7, 0]),
            (StatField::TdRushing, &[8, 0]),
            (StatField::YdsReceiving, &[9, 0]),
            (StatField::TdReceiving, &[10, 0]),
            (StatField::YdsReturn, &[11, 0]),
            (StatField::TdReturn, &[12, 0]),
            (StatField::FumTdMisc, &[13, 0]),
            (StatField::TwoPtMisc, &[14, 0]),
            (StatField::LostFum, &[15, 0]),
            (StatField::FantasyPts, &[16, 0]),
        ],
    };
}

pub struct PlayerTableExtractor {
    layout: &'static PlayerRowLayout,
}

impl Default for PlayerTableExtractor {
    fn default() -> Self {
        Self::new(&PlayerRowLayout::WEEK_STATS)
    }
}

impl PlayerTableExtractor {
    pub fn new(layout: &'static PlayerRowLayout) -> Self {
        Self { layout }
    }

    /// Reads one `<tr>`. Never fails: missing text becomes `""`, bad numbers `0.0`.
    pub fn extract_row(&self, row: &Element, period: Period) -> PlayerWeekStat {
        let text_at = |path: &[usize]| row.at(path).and_then(Element::text).map(str::trim);

        let (position, team) = split_position_team(text_at(self.layout.position_team).unwrap_or(""));

        let mut stats = StatLine::default();
        for &(field, path) in &self.layout.stats {
            stats.set(field, stat_value(text_at(path)));
        }

        PlayerWeekStat {
            name: text_at(self.layout.name).unwrap_or_default().to_string(),
            position,
            team,
            opponent: text_at(self.layout.opponent).unwrap_or_default().to_string(),
            stats,
            year: period.year,
            week: period.week,
        }
    }
}

impl PageExtractor for PlayerTableExtractor {
    type Record = PlayerWeekStat;

    fn extract(&self, page: &str, period: Period) -> Result<Option<Vec<PlayerWeekStat>>> {
        let Some(fragment) = table_fragment(page) else {
            return Ok(None);
        };

        let table = parse_element(&fragment)?;
        let rows = table
            .child(1)
            .map(|body| {
                body.children_named("tr")
                    .map(|row| self.extract_row(row, period))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(rows))
    }
}

/// `"QB - NE"` → `("QB", "NE")`; without a team the player is a free agent.
pub fn split_position_team(text: &str) -> (String, String) {
    let mut parts = text.split(" - ");
    let position = parts.next().unwrap_or_default().trim().to_string();
    let team = parts.next().map(str::trim).unwrap_or(FREE_AGENT).to_string();
    (position, team)
}

/// Numeric stat cell value; anything unreadable counts as zero.
pub fn stat_value(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
