use crate::domain::Manifest;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes assembled record sets as pretty JSON under the data directory.
#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn get_path_for_key(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<PathBuf> {
        self.ensure_dir(&self.data_dir)?;

        let path = self.get_path_for_key(key);
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Saves `manifest` as `<kind>_<start>_<end>.json` and returns the path.
    pub fn save_manifest<T: Serialize>(&self, manifest: &Manifest<T>) -> Result<PathBuf> {
        let key = format!(
            "{}_{}-{}_{}-{}",
            manifest.metadata.kind,
            manifest.range.start.year,
            manifest.range.start.week,
            manifest.range.end.year,
            manifest.range.end.week
        );
        let path = self.write_json_file(&key, manifest)?;
        info!("Exported {} rows to {}", manifest.total_rows, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Period, PullRange};

    #[test]
    fn writes_manifest_named_by_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path().join("data"));
        let range = PullRange {
            start: Period::new(2015, 1),
            end: Period::new(2015, 3),
        };

        let path = store
            .save_manifest(&Manifest::new("players", "123", range, vec!["a", "b"]))
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "players_2015-1_2015-3.json");
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["total_rows"], 2);
        assert_eq!(written["metadata"]["league_id"], "123");
        assert_eq!(written["rows"][1], "b");
    }
}
