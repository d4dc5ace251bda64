//! Configuration management

use crate::domain::Category;
use crate::error::{Result, SkillogError};
use crate::infrastructure::root::SKILLOG_DIR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Maximum number of undo steps kept; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Record removals of unknown ids as undoable steps
    pub record_noop_removals: bool,
    /// Category used by `add` when none is given
    pub default_category: Category,
}

impl Config {
    /// Load config from .skillog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(SKILLOG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SkillogError::NotSkillogDirectory(path.to_path_buf())
            } else {
                SkillogError::Io(e)
            }
        })?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| SkillogError::Config(format!("Failed to parse config.toml: {}", e)))?;

        // A zero cap would silently disable undo
        if config.history_limit == Some(0) {
            warn!("history_limit = 0 in config.toml, treating history as unbounded");
            config.history_limit = None;
        }

        Ok(config)
    }

    /// Save config to .skillog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let skillog_dir = path.join(SKILLOG_DIR);

        if !skillog_dir.exists() {
            fs::create_dir(&skillog_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(skillog_dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }
}
