//! Snapshot history: past/present/future stacks over the entry collection

use crate::domain::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Immutable full copy of the entry collection at one point in time.
///
/// A snapshot owns its entries, so `clone` is a deep copy and no entry is
/// ever shared between two snapshots. Mutations derive a new snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<LogEntry>);

impl Snapshot {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Snapshot(entries)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|e| e.id == id)
    }

    /// New snapshot with `entry` appended
    pub fn with_entry(&self, entry: LogEntry) -> Self {
        let mut entries = self.0.clone();
        entries.push(entry);
        Snapshot(entries)
    }

    /// New snapshot without the entry carrying `id`
    pub fn without_entry(&self, id: &str) -> Self {
        Snapshot(self.0.iter().filter(|e| e.id != id).cloned().collect())
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.0
    }
}

/// Past/present/future stacks.
///
/// `past` runs oldest to newest, `future` runs nearest to farthest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(default)]
    pub past: VecDeque<Snapshot>,
    #[serde(default)]
    pub present: Snapshot,
    #[serde(default)]
    pub future: VecDeque<Snapshot>,
}

impl HistoryState {
    /// Seed state: `present` holds the given entries, both stacks empty
    pub fn seeded(present: Snapshot) -> Self {
        HistoryState {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// State after a fresh edit producing `next`.
    ///
    /// The old present moves onto `past`, `future` is cleared, and with a
    /// `limit` the oldest past snapshots are evicted beyond that depth.
    pub fn record(&self, next: Snapshot, limit: Option<usize>) -> Self {
        let mut past = self.past.clone();
        past.push_back(self.present.clone());
        if let Some(limit) = limit {
            while past.len() > limit {
                past.pop_front();
            }
        }

        HistoryState {
            past,
            present: next,
            future: VecDeque::new(),
        }
    }

    /// State after stepping back one snapshot, or `None` if `past` is empty
    pub fn undone(&self) -> Option<Self> {
        let mut past = self.past.clone();
        let previous = past.pop_back()?;
        let mut future = self.future.clone();
        future.push_front(self.present.clone());

        Some(HistoryState {
            past,
            present: previous,
            future,
        })
    }

    /// State after stepping forward one snapshot, or `None` if `future` is empty
    pub fn redone(&self) -> Option<Self> {
        let mut future = self.future.clone();
        let next = future.pop_front()?;
        let mut past = self.past.clone();
        past.push_back(self.present.clone());

        Some(HistoryState {
            past,
            present: next,
            future,
        })
    }
}
