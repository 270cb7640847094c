use crate::domain::storage::{RecordTable, Storage, StorageKeys};
use crate::domain::{MatchupRecord, MatchupSide, Period, PlayerWeekStat, StatField};
use crate::error::{PullError, Result};
use rusqlite::{Connection, ToSql};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

const SIDE_COLUMNS: [(&str, &str); 9] = [
    ("team", "TEXT"),
    ("owner", "TEXT"),
    ("wins", "INTEGER"),
    ("losses", "INTEGER"),
    ("ties", "INTEGER"),
    ("rank", "INTEGER"),
    ("streak", "TEXT"),
    ("waiver", "INTEGER"),
    ("fantasy_pts", "REAL"),
];

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!("Opening store at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(&schema())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PullError::Other("store connection lock poisoned".to_string()))
    }
}

fn player_columns() -> Vec<String> {
    ["name", "position", "team", "opponent"]
        .into_iter()
        .chain(StatField::ALL.iter().map(|field| field.column()))
        .chain(["year", "week"])
        .map(str::to_string)
        .collect()
}

fn matchup_columns() -> Vec<String> {
    let mut columns: Vec<String> = ["1", "2"]
        .iter()
        .flat_map(|side| SIDE_COLUMNS.iter().map(move |(name, _)| format!("{name}_{side}")))
        .collect();
    columns.extend(["year".to_string(), "week".to_string()]);
    columns
}

fn schema() -> String {
    let player_defs: Vec<String> = player_columns()
        .into_iter()
        .map(|column| match column.as_str() {
            "name" | "position" | "team" | "opponent" => format!("{column} TEXT NOT NULL"),
            "year" | "week" => format!("{column} INTEGER NOT NULL"),
            _ => format!("{column} REAL NOT NULL"),
        })
        .collect();

    let matchup_defs: Vec<String> = ["1", "2"]
        .iter()
        .flat_map(|side| {
            SIDE_COLUMNS
                .iter()
                .map(move |(name, kind)| format!("{name}_{side} {kind} NOT NULL"))
        })
        .chain(["year INTEGER NOT NULL".to_string(), "week INTEGER NOT NULL".to_string()])
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {players} ({player_defs});
         CREATE INDEX IF NOT EXISTS {players}_period ON {players} (year, week);
         CREATE TABLE IF NOT EXISTS {matchups} ({matchup_defs});
         CREATE INDEX IF NOT EXISTS {matchups}_period ON {matchups} (year, week);",
        players = StorageKeys::PLAYER_STATS,
        matchups = StorageKeys::MATCHUPS,
        player_defs = player_defs.join(", "),
        matchup_defs = matchup_defs.join(", "),
    )
}

fn insert_sql(table: &str, columns: &[String]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn side_params(side: &MatchupSide) -> [&dyn ToSql; 9] {
    [
        &side.team,
        &side.owner,
        &side.wins,
        &side.losses,
        &side.ties,
        &side.rank,
        &side.streak,
        &side.waiver,
        &side.fantasy_pts,
    ]
}

impl Storage for SqliteStore {
    fn last_period(&self, table: RecordTable) -> Result<Option<Period>> {
        let conn = self.lock()?;

        let year: Option<i32> = conn.query_row(
            &format!("SELECT MAX(year) FROM {}", table.name()),
            [],
            |row| row.get(0),
        )?;
        let Some(year) = year else {
            return Ok(None);
        };

        let week: Option<u32> = conn.query_row(
            &format!("SELECT MAX(week) FROM {} WHERE year = ?1", table.name()),
            [year],
            |row| row.get(0),
        )?;

        Ok(week.map(|week| Period::new(year, week)))
    }

    fn append_player_stats(&self, rows: &[PlayerWeekStat]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql(StorageKeys::PLAYER_STATS, &player_columns()))?;
            for row in rows {
                let stats = row.stats.values();
                let mut params: Vec<&dyn ToSql> =
                    vec![&row.name as &dyn ToSql, &row.position, &row.team, &row.opponent];
                params.extend(stats.iter().map(|value| value as &dyn ToSql));
                params.push(&row.year);
                params.push(&row.week);
                stmt.execute(params.as_slice())?;
            }
        }
        tx.commit()?;

        info!("Appended {} rows to {}", rows.len(), StorageKeys::PLAYER_STATS);
        Ok(rows.len())
    }

    fn append_matchups(&self, rows: &[MatchupRecord]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql(StorageKeys::MATCHUPS, &matchup_columns()))?;
            for row in rows {
                let mut params: Vec<&dyn ToSql> = Vec::with_capacity(20);
                params.extend(side_params(&row.home));
                params.extend(side_params(&row.away));
                params.push(&row.year);
                params.push(&row.week);
                stmt.execute(params.as_slice())?;
            }
        }
        tx.commit()?;

        info!("Appended {} rows to {}", rows.len(), StorageKeys::MATCHUPS);
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatLine;

    fn player(name: &str, year: i32, week: u32) -> PlayerWeekStat {
        PlayerWeekStat {
            name: name.to_string(),
            position: "WR".to_string(),
            team: "DAL".to_string(),
            opponent: "NYG".to_string(),
            stats: StatLine {
                yds_receiving: 88.0,
                fantasy_pts: 14.8,
                ..Default::default()
            },
            year,
            week,
        }
    }

    fn side(team: &str) -> MatchupSide {
        MatchupSide {
            team: team.to_string(),
            owner: "owner".to_string(),
            wins: 3,
            losses: 1,
            ties: 0,
            rank: 2,
            streak: "W2".to_string(),
            waiver: 6,
            fantasy_pts: 101.5,
        }
    }

    #[test]
    fn empty_table_has_no_checkpoint() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.last_period(RecordTable::Players).unwrap(), None);
        assert_eq!(store.last_period(RecordTable::Matchups).unwrap(), None);
    }

    #[test]
    fn checkpoint_is_max_week_of_max_year() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .append_player_stats(&[
                player("A", 2014, 17),
                player("B", 2015, 3),
                player("C", 2015, 9),
                player("D", 2015, 4),
            ])
            .unwrap();

        assert_eq!(
            store.last_period(RecordTable::Players).unwrap(),
            Some(Period::new(2015, 9))
        );
        assert_eq!(store.last_period(RecordTable::Matchups).unwrap(), None);
    }

    #[test]
    fn stores_player_columns() {
        let store = SqliteStore::in_memory().unwrap();
        store.append_player_stats(&[player("Dez Bryant", 2014, 5)]).unwrap();

        let conn = store.lock().unwrap();
        let (name, yds, pts): (String, f64, f64) = conn
            .query_row(
                "SELECT name, yds_receiving, fantasy_pts FROM player_stats",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!((name.as_str(), yds, pts), ("Dez Bryant", 88.0, 14.8));
    }

    #[test]
    fn stores_matchups_with_side_suffixes() {
        let store = SqliteStore::in_memory().unwrap();
        let record = MatchupRecord {
            home: side("Home"),
            away: side("Away"),
            year: 2015,
            week: 6,
        };
        assert_eq!(store.append_matchups(&[record.clone(), record]).unwrap(), 2);

        let conn = store.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM matchups WHERE team_2 = 'Away'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
        drop(conn);

        assert_eq!(
            store.last_period(RecordTable::Matchups).unwrap(),
            Some(Period::new(2015, 6))
        );
    }

    #[test]
    fn reopening_a_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fantasy.db");

        SqliteStore::open(&path)
            .unwrap()
            .append_player_stats(&[player("A", 2013, 2)])
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(
            reopened.last_period(RecordTable::Players).unwrap(),
            Some(Period::new(2013, 2))
        );
    }
}
