//! Error types for skillog

use crate::infrastructure::durable::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for skillog
#[derive(Debug, Error)]
pub enum SkillogError {
    #[error("Not a skillog directory: {0}")]
    NotSkillogDirectory(PathBuf),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No entry with id: {0}")]
    EntryNotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SkillogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SkillogError::NotSkillogDirectory(_) => 2,
            SkillogError::Validation(_) | SkillogError::InvalidDate(_) => 3,
            SkillogError::EntryNotFound(_) => 4,
            SkillogError::Store(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SkillogError::NotSkillogDirectory(path) => {
                format!(
                    "Not a skillog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'skillog init' in this directory to start a log\n\
                    • Navigate to an existing skillog directory\n\
                    • Set SKILLOG_ROOT environment variable to your log path",
                    path.display()
                )
            }
            SkillogError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2024-01-05)",
                    input
                )
            }
            SkillogError::EntryNotFound(id) => {
                format!(
                    "No entry with id: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'skillog today --ids' or 'skillog list' to see entry ids",
                    id
                )
            }
            SkillogError::Store(err) => {
                format!(
                    "Storage error: {}\n\n\
                    The change was not applied; your log is unchanged.",
                    err
                )
            }
            SkillogError::Config(msg) if msg.contains("Unknown config key") => {
                format!(
                    "{}\n\n\
                    Example: skillog config history_limit 50",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SkillogError
pub type Result<T> = std::result::Result<T, SkillogError>;
