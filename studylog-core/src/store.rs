//! Session log persistence.
//!
//! The log is a single JSON array of [`StudySession`] records. It is read
//! wholesale, and the only writer rewrites the whole array sorted by date.
//! There is no partial-write protection and no locking: one writer, invoked by
//! hand, never runs concurrently with itself.

use crate::error::Result;
use crate::types::StudySession;
use std::path::{Path, PathBuf};

/// Handle to the JSON session log on disk.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

/// Result of a lenient read used by the appender.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// Sessions read from disk (empty if the read failed)
    pub sessions: Vec<StudySession>,
    /// Why the read failed, if it did
    pub read_error: Option<String>,
}

impl Snapshot {
    /// True when the on-disk contents could not be used.
    pub fn is_recovered(&self) -> bool {
        self.read_error.is_some()
    }
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the previous contents are copied to before overwriting an
    /// unreadable log.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    /// Read every session.
    ///
    /// A missing or blank file is an empty log. Malformed JSON is an error.
    pub fn load(&self) -> Result<Vec<StudySession>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Session log not found, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sessions: Vec<StudySession> = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            sessions = sessions.len(),
            "Loaded session log"
        );
        Ok(sessions)
    }

    /// Read every session, falling back to an empty log on any failure.
    pub fn snapshot(&self) -> Snapshot {
        match self.load() {
            Ok(sessions) => Snapshot {
                sessions,
                read_error: None,
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read session log, continuing with an empty collection"
                );
                Snapshot {
                    sessions: Vec::new(),
                    read_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Sort by date and rewrite the whole log.
    pub fn save(&self, sessions: &mut [StudySession]) -> Result<()> {
        sort_by_date(sessions);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(sessions)?;
        json.push('\n');
        std::fs::write(&self.path, json)?;

        tracing::info!(
            path = %self.path.display(),
            sessions = sessions.len(),
            "Wrote session log"
        );
        Ok(())
    }

    /// Append one session to a snapshot and persist the result.
    ///
    /// If the snapshot came from an unreadable file, the old bytes are copied
    /// to [`backup_path`](Self::backup_path) first. Returns the full sorted
    /// collection as written.
    pub fn append(&self, snapshot: Snapshot, session: StudySession) -> Result<Vec<StudySession>> {
        if snapshot.is_recovered() && self.path.exists() {
            let backup = self.backup_path();
            std::fs::copy(&self.path, &backup)?;
            tracing::warn!(backup = %backup.display(), "Backed up unreadable session log");
        }

        let mut sessions = snapshot.sessions;
        sessions.push(session);
        self.save(&mut sessions)?;
        Ok(sessions)
    }
}

/// Stable sort by date ascending; same-day sessions keep insertion order.
pub fn sort_by_date(sessions: &mut [StudySession]) {
    sessions.sort_by_key(|s| s.date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn session(date: &str, topic: &str, minutes: u32) -> StudySession {
        StudySession::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            topic,
            minutes,
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nope.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_blank_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(SessionStore::new(path).load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_error_but_snapshot_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"date\": ").unwrap();
        let store = SessionStore::new(&path);

        assert!(store.load().is_err());

        let snapshot = store.snapshot();
        assert!(snapshot.is_recovered());
        assert!(snapshot.sessions.is_empty());
    }

    #[test]
    fn test_save_sorts_stably() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("log.json"));

        let mut sessions = vec![
            session("2024-02-01", "B", 10),
            session("2024-01-01", "A", 20),
            session("2024-02-01", "C", 30),
        ];
        store.save(&mut sessions).unwrap();

        let loaded = store.load().unwrap();
        let order: Vec<_> = loaded.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested/deeper/log.json"));
        store.save(&mut [session("2024-01-01", "A", 5)]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_append_backs_up_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "not json").unwrap();
        let store = SessionStore::new(&path);

        let snapshot = store.snapshot();
        let written = store
            .append(snapshot, session("2024-01-05", "DSA", 60))
            .unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(
            std::fs::read_to_string(store.backup_path()).unwrap(),
            "not json"
        );
        assert!(store.backup_path().ends_with("log.json.bak"));
        assert_eq!(store.load().unwrap(), written);
    }
}
