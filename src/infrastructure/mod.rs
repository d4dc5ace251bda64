//! Infrastructure layer - Persistence and on-disk layout

pub mod config;
pub mod durable;
pub mod log_repository;
pub mod preferences;
pub mod root;

pub use config::Config;
pub use durable::{DurableStore, FileStore, MemoryStore, StoreError};
pub use log_repository::LogRepository;
pub use preferences::{Preference, PreferenceStore};
pub use root::LogRoot;
