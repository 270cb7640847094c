use super::Period;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Envelope written around an exported record set.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest<T> {
    pub total_rows: usize,
    pub last_updated: String,
    pub range: PullRange,
    pub rows: Vec<T>,
    pub metadata: ManifestMetadata,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PullRange {
    pub start: Period,
    pub end: Period,
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub league_id: String,
    pub kind: String,
    pub version: String,
}

impl<T> Manifest<T> {
    pub fn new(kind: &str, league_id: &str, range: PullRange, rows: Vec<T>) -> Self {
        Self {
            total_rows: rows.len(),
            last_updated: Local::now().to_rfc3339(),
            range,
            rows,
            metadata: ManifestMetadata {
                league_id: league_id.to_string(),
                kind: kind.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}
