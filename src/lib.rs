//! skillog - Practice session log with undo/redo history
//!
//! Entries live in a versioned store: every change pushes a full snapshot onto
//! an undo stack, and the whole history is persisted as one record so a crash
//! never splits the entries from their history.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SkillogError;
