//! Domain layer - Log entries, snapshot history and summaries

pub mod day_ref;
pub mod entry;
pub mod history;
pub mod summary;
pub mod theme;

pub use day_ref::DayRef;
pub use entry::{Category, EntryDraft, LogEntry};
pub use history::{HistoryState, Snapshot};
pub use summary::{DailyStats, HeuristicSummarizer, Summarizer, Summary};
pub use theme::Theme;
