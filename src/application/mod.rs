//! Application layer - Use cases and orchestration

pub mod history;
pub mod init;
pub mod manage_config;

pub use history::{HistoryManager, HistoryOptions, Transition};
pub use init::InitService;
pub use manage_config::ConfigService;
