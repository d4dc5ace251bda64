//! Committed log entries and their persisted history record

use crate::domain::{HistoryState, LogEntry, Snapshot};
use crate::infrastructure::durable::{DurableStore, StoreError};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Key of the combined past/present/future record
pub const HISTORY_KEY: &str = "logs-history";

/// Key of the flat entry list written before history tracking existed
pub const LEGACY_LOGS_KEY: &str = "logs";

/// Where a malformed history record is kept before it is replaced
pub const CORRUPT_HISTORY_KEY: &str = "logs-history.corrupt";

/// A history record that was present but could not be loaded
#[derive(Debug, Clone, PartialEq)]
enum DamagedRecord {
    /// The read itself failed; the record may still be intact
    Unreadable,
    /// The bytes were read but did not decode
    Malformed(Vec<u8>),
}

/// Read-side view over the committed entry collection.
///
/// The committed collection is the `present` of the history record, so the
/// history and the entries always land in the store in one write.
#[derive(Debug)]
pub struct LogRepository<S> {
    store: S,
    committed: Vec<LogEntry>,
    damaged: Option<DamagedRecord>,
}

impl<S: DurableStore> LogRepository<S> {
    /// Open the repository, degrading to an empty collection on bad data
    pub fn open(store: S) -> Self {
        Self::open_with_history(store).0
    }

    pub(crate) fn open_with_history(store: S) -> (Self, HistoryState) {
        let (history, damaged) = load_history(&store);
        let repo = LogRepository {
            store,
            committed: history.present.entries().to_vec(),
            damaged,
        };
        (repo, history)
    }

    /// All committed entries in stored order
    pub fn list_all(&self) -> &[LogEntry] {
        &self.committed
    }

    /// Entries for `date`, ascending by timestamp; ties keep insertion order
    pub fn list_for_date(&self, date: NaiveDate) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self
            .committed
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        entries
    }

    /// Persist `state` as one record and make its present the committed collection.
    ///
    /// Nothing changes in memory unless the write succeeds. A record that
    /// failed to read at open is never overwritten; a malformed one is copied
    /// to [`CORRUPT_HISTORY_KEY`] first.
    pub(crate) fn commit(&mut self, state: &HistoryState) -> Result<(), StoreError> {
        match &self.damaged {
            Some(DamagedRecord::Unreadable) => {
                return Err(StoreError::Unavailable(format!(
                    "'{}' could not be read when the log was opened; not overwriting it",
                    HISTORY_KEY
                )));
            }
            Some(DamagedRecord::Malformed(bytes)) => {
                self.store.write(CORRUPT_HISTORY_KEY, bytes)?;
                warn!(
                    key = CORRUPT_HISTORY_KEY,
                    "kept malformed log history before replacing it"
                );
            }
            None => {}
        }

        let bytes = serde_json::to_vec_pretty(state)?;
        self.store.write(HISTORY_KEY, &bytes)?;
        self.committed = state.present.entries().to_vec();
        self.damaged = None;

        debug!(
            entries = self.committed.len(),
            past = state.past.len(),
            future = state.future.len(),
            "committed log history"
        );
        Ok(())
    }

    /// Drop any legacy list, then the persisted record.
    ///
    /// The legacy list goes first: while the history record exists it wins
    /// at load, so a failure between the two removals changes nothing a
    /// reopen would see.
    pub(crate) fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(LEGACY_LOGS_KEY)?;
        self.store.remove(HISTORY_KEY)?;
        self.committed.clear();
        self.damaged = None;
        Ok(())
    }
}

fn load_history<S: DurableStore>(store: &S) -> (HistoryState, Option<DamagedRecord>) {
    match store.read(HISTORY_KEY) {
        Ok(Some(bytes)) => match serde_json::from_slice::<HistoryState>(&bytes) {
            Ok(state) => (state, None),
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "malformed log history, starting empty");
                (HistoryState::default(), Some(DamagedRecord::Malformed(bytes)))
            }
        },
        Ok(None) => (HistoryState::seeded(load_legacy_entries(store)), None),
        Err(e) => {
            warn!(key = HISTORY_KEY, error = %e, "failed to read log history, starting empty");
            (HistoryState::default(), Some(DamagedRecord::Unreadable))
        }
    }
}

fn load_legacy_entries<S: DurableStore>(store: &S) -> Snapshot {
    match store.read(LEGACY_LOGS_KEY) {
        Ok(Some(bytes)) => match serde_json::from_slice::<Vec<LogEntry>>(&bytes) {
            Ok(entries) => Snapshot::new(entries),
            Err(e) => {
                warn!(key = LEGACY_LOGS_KEY, error = %e, "malformed legacy logs, ignoring");
                Snapshot::default()
            }
        },
        Ok(None) => Snapshot::default(),
        Err(e) => {
            warn!(key = LEGACY_LOGS_KEY, error = %e, "failed to read legacy logs, ignoring");
            Snapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::infrastructure::durable::MemoryStore;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(id: &str, date: (i32, u32, u32), hour: u32) -> LogEntry {
        LogEntry {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            skill: "Rust".to_string(),
            category: Category::Programming,
            hours: 1.0,
            notes: String::new(),
            timestamp: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, hour, 0, 0)
                .unwrap(),
        }
    }

    fn ids(entries: &[LogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_open_empty_store() {
        let repo = LogRepository::open(MemoryStore::new());
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_list_for_date_sorts_by_timestamp() {
        let store = MemoryStore::new();
        let mut repo = LogRepository::open(store);
        let present = Snapshot::new(vec![
            entry("late", (2024, 1, 5), 18),
            entry("other-day", (2024, 1, 6), 1),
            entry("early", (2024, 1, 5), 7),
            entry("noon", (2024, 1, 5), 12),
        ]);
        repo.commit(&HistoryState::seeded(present)).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(ids(&repo.list_for_date(day)), vec!["early", "noon", "late"]);
        // Stored order is untouched
        assert_eq!(
            ids(repo.list_all()),
            vec!["late", "other-day", "early", "noon"]
        );
    }

    #[test]
    fn test_list_for_date_is_stable_on_ties() {
        let mut repo = LogRepository::open(MemoryStore::new());
        let present = Snapshot::new(vec![
            entry("first", (2024, 1, 5), 9),
            entry("second", (2024, 1, 5), 9),
        ]);
        repo.commit(&HistoryState::seeded(present)).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(ids(&repo.list_for_date(day)), vec!["first", "second"]);
    }

    #[test]
    fn test_commit_persists_single_record() {
        let store = MemoryStore::new();
        let mut repo = LogRepository::open(store.clone());
        let state = HistoryState::default().record(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)]), None);
        repo.commit(&state).unwrap();

        let reopened = LogRepository::open_with_history(store);
        assert_eq!(reopened.1, state);
        assert_eq!(ids(reopened.0.list_all()), vec!["a"]);
    }

    #[test]
    fn test_failed_commit_keeps_committed_collection() {
        let store = MemoryStore::new();
        let mut repo = LogRepository::open(store.clone());
        store.set_fail_writes(true);

        let state = HistoryState::seeded(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)]));
        assert!(repo.commit(&state).is_err());
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_malformed_record_degrades_to_empty() {
        let store = MemoryStore::new();
        store.write(HISTORY_KEY, b"{not json").unwrap();

        let (repo, history) = LogRepository::open_with_history(store);
        assert!(repo.list_all().is_empty());
        assert_eq!(history, HistoryState::default());
    }

    #[test]
    fn test_read_failure_degrades_to_empty() {
        let store = MemoryStore::new();
        store.write(HISTORY_KEY, b"{\"present\":[]}").unwrap();
        store.set_fail_reads(true);

        let repo = LogRepository::open(store);
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_legacy_list_seeds_present() {
        let store = MemoryStore::new();
        let legacy = vec![entry("old", (2023, 12, 31), 8)];
        store
            .write(LEGACY_LOGS_KEY, &serde_json::to_vec(&legacy).unwrap())
            .unwrap();

        let (repo, history) = LogRepository::open_with_history(store);
        assert_eq!(ids(repo.list_all()), vec!["old"]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_removes_record_and_legacy() {
        let store = MemoryStore::new();
        store.write(LEGACY_LOGS_KEY, b"[]").unwrap();
        let mut repo = LogRepository::open(store.clone());
        repo.commit(&HistoryState::seeded(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)])))
            .unwrap();

        repo.clear().unwrap();
        assert!(repo.list_all().is_empty());
        assert_eq!(store.raw(HISTORY_KEY), None);
        assert_eq!(store.raw(LEGACY_LOGS_KEY), None);
    }

    #[test]
    fn test_unreadable_record_is_never_overwritten() {
        let store = MemoryStore::new();
        store.write(HISTORY_KEY, b"{\"present\":[]}").unwrap();
        store.set_fail_reads(true);
        let mut repo = LogRepository::open(store.clone());
        store.set_fail_reads(false);

        let state = HistoryState::seeded(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)]));
        assert!(matches!(repo.commit(&state), Err(StoreError::Unavailable(_))));
        assert!(repo.list_all().is_empty());
        assert_eq!(store.raw(HISTORY_KEY), Some(b"{\"present\":[]}".to_vec()));
    }

    #[test]
    fn test_malformed_record_is_kept_aside_on_commit() {
        let store = MemoryStore::new();
        store.write(HISTORY_KEY, b"{not json").unwrap();
        let mut repo = LogRepository::open(store.clone());

        let state = HistoryState::seeded(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)]));
        repo.commit(&state).unwrap();

        assert_eq!(store.raw(CORRUPT_HISTORY_KEY), Some(b"{not json".to_vec()));
        assert_eq!(ids(LogRepository::open(store).list_all()), vec!["a"]);
    }

    #[test]
    fn test_clear_keeps_record_when_legacy_removal_fails() {
        let store = MemoryStore::new();
        store.write(LEGACY_LOGS_KEY, b"[]").unwrap();
        let mut repo = LogRepository::open(store.clone());
        repo.commit(&HistoryState::seeded(Snapshot::new(vec![entry("a", (2024, 1, 5), 9)])))
            .unwrap();

        store.set_fail_remove_of(Some(LEGACY_LOGS_KEY));
        assert!(repo.clear().is_err());
        assert!(store.raw(HISTORY_KEY).is_some());
        assert_eq!(ids(repo.list_all()), vec!["a"]);
    }
}
