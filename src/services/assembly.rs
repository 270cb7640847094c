use crate::domain::{MatchupRecord, PlayerWeekStat};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// Collects the records of one pull into a single table.
pub trait Assembler {
    type Record;

    fn extend(&mut self, rows: Vec<Self::Record>);
    fn len(&self) -> usize;
    fn finish(self) -> Vec<Self::Record>;
}

/// Player rows, deduplicated on `finish`.
#[derive(Debug, Default)]
pub struct PlayerAssembler {
    rows: Vec<PlayerWeekStat>,
}

impl Assembler for PlayerAssembler {
    type Record = PlayerWeekStat;

    fn extend(&mut self, rows: Vec<PlayerWeekStat>) {
        self.rows.extend(rows);
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn finish(self) -> Vec<PlayerWeekStat> {
        dedup_player_stats(self.rows)
    }
}

/// Matchups are kept as fetched: repeated fixtures are real data.
#[derive(Debug, Default)]
pub struct MatchupAssembler {
    rows: Vec<MatchupRecord>,
}

impl Assembler for MatchupAssembler {
    type Record = MatchupRecord;

    fn extend(&mut self, rows: Vec<MatchupRecord>) {
        self.rows.extend(rows);
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn finish(self) -> Vec<MatchupRecord> {
        self.rows
    }
}

type Identity = (String, String, i32, u32);

#[derive(PartialEq, Eq, Hash)]
struct Fingerprint {
    position: String,
    opponent: String,
    stats: [u64; 13],
}

impl Fingerprint {
    fn of(row: &PlayerWeekStat) -> Self {
        // 0.0 and -0.0 are the same value
        let stats = row
            .stats
            .values()
            .map(|value| if value == 0.0 { 0u64 } else { value.to_bits() });
        Self {
            position: row.position.clone(),
            opponent: row.opponent.clone(),
            stats,
        }
    }
}

/// Keeps the first row per (name, team, year, week), preserving order.
/// Exact repeats from overlapping pages drop silently; differing rows for the
/// same identity are logged.
pub fn dedup_player_stats(rows: Vec<PlayerWeekStat>) -> Vec<PlayerWeekStat> {
    let mut kept: FxHashMap<Identity, Fingerprint> = FxHashMap::default();
    let mut conflicts: FxHashSet<Identity> = FxHashSet::default();
    let before = rows.len();

    let unique: Vec<PlayerWeekStat> = rows
        .into_iter()
        .filter(|row| {
            let identity = (row.name.clone(), row.team.clone(), row.year, row.week);
            let fingerprint = Fingerprint::of(row);
            match kept.get(&identity) {
                None => {
                    kept.insert(identity, fingerprint);
                    true
                }
                Some(existing) => {
                    if *existing != fingerprint && conflicts.insert(identity) {
                        warn!(
                            "Conflicting rows for {} ({}) in {}, keeping the first",
                            row.name,
                            row.team,
                            row.period()
                        );
                    }
                    false
                }
            }
        })
        .collect();

    debug!("Dropped {} duplicate player rows", before - unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchupSide, StatLine};

    fn player(name: &str, team: &str, week: u32, pts: f64) -> PlayerWeekStat {
        PlayerWeekStat {
            name: name.into(),
            position: "WR".into(),
            team: team.into(),
            opponent: "SF".into(),
            stats: StatLine {
                fantasy_pts: pts,
                ..Default::default()
            },
            year: 2015,
            week,
        }
    }

    #[test]
    fn collapses_identical_rows() {
        let mut assembler = PlayerAssembler::default();
        assembler.extend(vec![player("Julio Jones", "ATL", 1, 24.1), player("Roddy White", "ATL", 1, 3.0)]);
        assembler.extend(vec![player("Julio Jones", "ATL", 1, 24.1)]);
        assert_eq!(assembler.len(), 3);

        let rows = assembler.finish();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Julio Jones");
        assert_eq!(rows[1].name, "Roddy White");
    }

    #[test]
    fn one_row_per_identity() {
        let rows = dedup_player_stats(vec![
            player("Julio Jones", "ATL", 1, 24.1),
            player("Julio Jones", "ATL", 1, 25.0),
            player("Julio Jones", "ATL", 2, 9.0),
            player("Julio Jones", "Free", 1, 0.0),
        ]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].stats.fantasy_pts, 24.1);
    }

    #[test]
    fn zero_signs_are_equal() {
        let rows = dedup_player_stats(vec![player("A", "NE", 1, 0.0), player("A", "NE", 1, -0.0)]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn dedup_is_idempotent() {
        let input = vec![
            player("A", "NE", 1, 1.0),
            player("B", "NE", 1, 2.0),
            player("A", "NE", 1, 1.0),
            player("C", "Free", 2, 0.0),
        ];
        let once = dedup_player_stats(input.clone());
        let twice = dedup_player_stats(once.clone());
        assert_eq!(once, twice);

        let mut doubled = input.clone();
        doubled.extend(input);
        assert_eq!(dedup_player_stats(doubled), once);
    }

    #[test]
    fn matchups_keep_repeats() {
        let side = MatchupSide {
            team: "T".into(),
            owner: "o".into(),
            wins: 1,
            losses: 0,
            ties: 0,
            rank: 1,
            streak: "W1".into(),
            waiver: 3,
            fantasy_pts: 90.0,
        };
        let record = MatchupRecord {
            home: side.clone(),
            away: side,
            year: 2015,
            week: 1,
        };

        let mut assembler = MatchupAssembler::default();
        assembler.extend(vec![record.clone(), record]);
        assert_eq!(assembler.finish().len(), 2);
    }
}
