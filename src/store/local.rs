//! The legacy, pre-cloud entry store. Originally a single browser
//! local-storage key; server-side it is a per-user JSON export file
//! dropped into `legacy_import_dir`. Modeled as a narrow trait so the
//! migrator can be driven by a test double.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calendar::dates::parse_local_date;

/// Read/clear access to one user's legacy entry collection.
pub trait LocalEntryStore {
    /// The raw serialized collection, or `None` when there is nothing
    /// stored. Read failures count as absence.
    fn read(&self) -> Option<String>;

    /// Remove the collection. Idempotent.
    fn clear(&self) -> anyhow::Result<()>;
}

/// A legacy record as the old client wrote it:
/// `{id: <epoch millis>, text: ..., date: <string or object>}`.
#[derive(Debug, Deserialize)]
pub struct LegacyEntry {
    pub id: i64,
    pub text: String,
    pub date: LegacyDate,
}

/// Legacy `date` fields drifted over time: some records hold a plain
/// `YYYY-MM-DD`, some a full ISO timestamp, some a serialized date
/// object. Normalization happens here, at the boundary, not inside the
/// date utility.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LegacyDate {
    Text(String),
    Parts { year: i32, month: u32, day: u32 },
}

impl LegacyDate {
    /// Best-effort reduction to a calendar day. Timestamp strings are
    /// truncated to their date component rather than converted through
    /// UTC, which would shift the day for westward users.
    pub fn normalize(&self) -> Option<NaiveDate> {
        match self {
            LegacyDate::Text(s) => {
                if let Some(date) = parse_local_date(s) {
                    return Some(date);
                }
                s.get(..10).and_then(parse_local_date)
            }
            LegacyDate::Parts { year, month, day } => {
                NaiveDate::from_ymd_opt(*year, *month, *day)
            }
        }
    }
}

pub fn parse_legacy_collection(raw: &str) -> Result<Vec<LegacyEntry>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Production store: one `<user_id>.json` file per user.
pub struct FileLocalStore {
    path: PathBuf,
}

impl FileLocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LocalEntryStore for FileLocalStore {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_date_plain() {
        let d = LegacyDate::Text("2024-01-08".into());
        assert_eq!(d.normalize(), NaiveDate::from_ymd_opt(2024, 1, 8));
    }

    #[test]
    fn test_legacy_date_iso_timestamp_truncates() {
        let d = LegacyDate::Text("2024-01-08T23:45:00.000Z".into());
        assert_eq!(d.normalize(), NaiveDate::from_ymd_opt(2024, 1, 8));
    }

    #[test]
    fn test_legacy_date_parts_object() {
        let d = LegacyDate::Parts {
            year: 2024,
            month: 1,
            day: 8,
        };
        assert_eq!(d.normalize(), NaiveDate::from_ymd_opt(2024, 1, 8));
    }

    #[test]
    fn test_legacy_date_garbage_is_none() {
        assert!(LegacyDate::Text("not a date".into()).normalize().is_none());
        assert!(LegacyDate::Parts {
            year: 2024,
            month: 2,
            day: 30
        }
        .normalize()
        .is_none());
    }

    #[test]
    fn test_parse_collection_mixed_date_shapes() {
        let raw = r#"[
            {"id": 1704672000000, "text": "first", "date": "2024-01-08"},
            {"id": 1704758400000, "text": "second", "date": "2024-01-09T08:00:00.000Z"},
            {"id": 1704844800000, "text": "third", "date": {"year": 2024, "month": 1, "day": 10}}
        ]"#;
        let parsed = parse_legacy_collection(raw).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(
            parsed[1].date.normalize(),
            NaiveDate::from_ymd_opt(2024, 1, 9)
        );
        assert_eq!(
            parsed[2].date.normalize(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
    }

    #[test]
    fn test_file_store_read_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(&path, "[]").unwrap();

        let store = FileLocalStore::new(path.clone());
        assert_eq!(store.read().as_deref(), Some("[]"));
        store.clear().unwrap();
        assert!(store.read().is_none());
        // Clearing again is fine.
        store.clear().unwrap();
    }
}
