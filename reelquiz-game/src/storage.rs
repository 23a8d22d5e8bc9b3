//! Statistics persistence backends.
//!
//! The file backend keeps the whole record in one JSON document and
//! replaces it atomically; the memory backend exists for tests and
//! headless harnesses.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::StatsStorage;
use crate::constants::STATS_FILE_NAME;
use crate::stats::CumulativeStats;

const TEMP_SUFFIX: &str = ".tmp";

/// Errors from the file-backed statistics store.
#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stats record is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Stores the statistics record as one JSON document on disk.
///
/// Writes land in a sibling temp file first and are renamed into place,
/// so an interrupted write never leaves a torn record behind.
#[derive(Debug, Clone)]
pub struct FileStatsStorage {
    path: PathBuf,
}

impl FileStatsStorage {
    /// Store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional file name inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STATS_FILE_NAME),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }
}

impl StatsStorage for FileStatsStorage {
    type Error = FileStorageError;

    fn load(&self) -> Result<Option<CumulativeStats>, Self::Error> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, stats: &CumulativeStats) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(stats)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// Keeps the statistics record in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStorage {
    record: Rc<RefCell<Option<CumulativeStats>>>,
}

impl StatsStorage for MemoryStatsStorage {
    type Error = std::convert::Infallible;

    fn load(&self) -> Result<Option<CumulativeStats>, Self::Error> {
        Ok(self.record.borrow().clone())
    }

    fn save(&self, stats: &CumulativeStats) -> Result<(), Self::Error> {
        *self.record.borrow_mut() = Some(stats.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameResult;
    use chrono::{TimeZone, Utc};

    fn unique_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "reelquiz-storage-{label}-{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn sample_stats() -> CumulativeStats {
        CumulativeStats {
            games_count: 3,
            total_correct_answers: 21,
            best_game: Some(GameResult::new(
                9,
                10,
                Utc.with_ymd_and_hms(2026, 8, 25, 9, 15, 0).unwrap(),
            )),
        }
    }

    #[test]
    fn file_storage_round_trips_the_record() {
        let storage = FileStatsStorage::new(unique_path("roundtrip"));
        let stats = sample_stats();
        storage.save(&stats).unwrap();
        assert_eq!(storage.load().unwrap(), Some(stats));
        fs::remove_file(storage.path()).unwrap();
    }

    #[test]
    fn missing_file_loads_as_none() {
        let storage = FileStatsStorage::new(unique_path("missing"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_leaves_no_temp_artifact() {
        let storage = FileStatsStorage::new(unique_path("atomic"));
        storage.save(&sample_stats()).unwrap();
        assert!(!storage.temp_path().exists());
        assert!(storage.path().exists());
        fs::remove_file(storage.path()).unwrap();
    }

    #[test]
    fn corrupt_record_reports_a_serde_error() {
        let path = unique_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let storage = FileStatsStorage::new(&path);
        let err = storage.load().unwrap_err();
        assert!(matches!(err, FileStorageError::Serde(_)));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn in_dir_uses_the_conventional_file_name() {
        let storage = FileStatsStorage::in_dir(Path::new("/tmp"));
        assert!(storage.path().ends_with(STATS_FILE_NAME));
    }

    #[test]
    fn memory_storage_shares_the_record_across_clones() {
        let storage = MemoryStatsStorage::default();
        assert!(storage.load().unwrap().is_none());
        storage.save(&sample_stats()).unwrap();
        assert_eq!(storage.clone().load().unwrap(), Some(sample_stats()));
    }
}
