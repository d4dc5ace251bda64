//! Undoable log mutations
//!
//! [`HistoryManager`] owns the past/present/future stacks and is the only
//! writer of the committed log. Each transition computes the next
//! [`HistoryState`], persists it as one record, and only then swaps it in, so
//! a failed write leaves both memory and disk at the last good state.

use crate::domain::{HistoryState, LogEntry};
use crate::error::Result;
use crate::infrastructure::{Config, DurableStore, LogRepository};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Outcome of a history operation
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The state changed; carries the new present collection
    Applied(Vec<LogEntry>),
    NothingToUndo,
    NothingToRedo,
    /// `remove` found no entry with this id and recorded nothing
    NoMatch(String),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}

/// Tuning knobs for [`HistoryManager`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Maximum depth of the undo stack; unbounded when `None`
    pub limit: Option<usize>,
    /// Record a removal of an unknown id as an undoable no-op step
    pub record_noop_removals: bool,
}

impl From<&Config> for HistoryOptions {
    fn from(config: &Config) -> Self {
        HistoryOptions {
            limit: config.history_limit,
            record_noop_removals: config.record_noop_removals,
        }
    }
}

pub struct HistoryManager<S> {
    repo: LogRepository<S>,
    state: HistoryState,
    options: HistoryOptions,
}

impl<S: DurableStore> HistoryManager<S> {
    pub fn open(store: S) -> Self {
        Self::with_options(store, HistoryOptions::default())
    }

    /// Load the persisted history, or seed it from the committed entries
    pub fn with_options(store: S, options: HistoryOptions) -> Self {
        let (repo, state) = LogRepository::open_with_history(store);
        HistoryManager {
            repo,
            state,
            options,
        }
    }

    pub fn add(&mut self, entry: LogEntry) -> Result<Transition> {
        debug!(id = %entry.id, skill = %entry.skill, "add entry");
        let next = self.state.present.with_entry(entry);
        let recorded = self.state.record(next, self.options.limit);
        self.apply(recorded)
    }

    pub fn remove(&mut self, id: &str) -> Result<Transition> {
        if !self.state.present.contains(id) && !self.options.record_noop_removals {
            debug!(id, "remove matched nothing");
            return Ok(Transition::NoMatch(id.to_string()));
        }

        debug!(id, "remove entry");
        let next = self.state.present.without_entry(id);
        let recorded = self.state.record(next, self.options.limit);
        self.apply(recorded)
    }

    pub fn undo(&mut self) -> Result<Transition> {
        match self.state.undone() {
            Some(next) => self.apply(next),
            None => Ok(Transition::NothingToUndo),
        }
    }

    pub fn redo(&mut self) -> Result<Transition> {
        match self.state.redone() {
            Some(next) => self.apply(next),
            None => Ok(Transition::NothingToRedo),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    pub fn list_all(&self) -> &[LogEntry] {
        self.repo.list_all()
    }

    pub fn list_for_date(&self, date: NaiveDate) -> Vec<LogEntry> {
        self.repo.list_for_date(date)
    }

    pub fn history(&self) -> &HistoryState {
        &self.state
    }

    /// Clear all entries and history back to the empty seed
    pub fn reset(&mut self) -> Result<()> {
        if let Err(e) = self.repo.clear() {
            warn!(error = %e, "failed to reset log history");
            return Err(e.into());
        }
        self.state = HistoryState::default();
        Ok(())
    }

    fn apply(&mut self, next: HistoryState) -> Result<Transition> {
        if let Err(e) = self.repo.commit(&next) {
            warn!(error = %e, "failed to persist log history, keeping last good state");
            return Err(e.into());
        }

        self.state = next;
        Ok(Transition::Applied(self.state.present.entries().to_vec()))
    }
}
