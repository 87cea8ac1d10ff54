use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// Durable counter state, written through on every mutation.
///
/// Field names serialize as `counterValue`, `totalPresses`, `todayCount`
/// and `lastVisitDate`; every field is optional on disk so a partial or
/// first-run file still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedRecord {
    pub counter_value: u64,
    pub total_presses: u64,
    pub today_count: u64,
    pub last_visit_date: Option<NaiveDate>,
}

pub trait RecordStore {
    /// Missing or unreadable state is a valid first run, never an error.
    fn load(&self) -> Option<PersistedRecord>;
    fn save(&self, record: &PersistedRecord) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::record_path().unwrap_or_else(|| PathBuf::from("keytally_state.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Option<PersistedRecord> {
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn save(&self, record: &PersistedRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(record).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileRecordStore::with_path(&path);
        let record = PersistedRecord {
            counter_value: 7,
            total_presses: 42,
            today_count: 9,
            last_visit_date: NaiveDate::from_ymd_opt(2024, 1, 2),
        };
        store.save(&record).unwrap();
        assert_eq!(store.load(), Some(record));
    }

    #[test]
    fn missing_file_is_first_run() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_file_is_first_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"{not json").unwrap();
        let store = FileRecordStore::with_path(&path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn serializes_with_storage_key_names() {
        let record = PersistedRecord {
            counter_value: 1,
            total_presses: 2,
            today_count: 3,
            last_visit_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("counterValue"));
        assert!(json.contains("totalPresses"));
        assert!(json.contains("todayCount"));
        assert!(json.contains("lastVisitDate"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, br#"{"totalPresses": 12}"#).unwrap();
        let store = FileRecordStore::with_path(&path);
        let record = store.load().unwrap();
        assert_eq!(record.total_presses, 12);
        assert_eq!(record.counter_value, 0);
        assert_eq!(record.today_count, 0);
        assert_eq!(record.last_visit_date, None);
    }
}
