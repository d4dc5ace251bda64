//! Config management use case

use crate::domain::Category;
use crate::error::{Result, SkillogError};
use crate::infrastructure::{Config, LogRoot};
use std::str::FromStr;

const VALID_KEYS: &str = "history_limit, record_noop_removals, default_category";

/// Service for managing log configuration
pub struct ConfigService {
    root: LogRoot,
}

impl ConfigService {
    pub fn new(root: LogRoot) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.root.load_config()?;

        match key {
            "history_limit" => Ok(config
                .history_limit
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())),
            "record_noop_removals" => Ok(config.record_noop_removals.to_string()),
            "default_category" => Ok(config.default_category.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.root.load_config()?;

        match key {
            "history_limit" => {
                config.history_limit = parse_limit(value)?;
            }
            "record_noop_removals" => {
                config.record_noop_removals = value.trim().parse::<bool>().map_err(|_| {
                    SkillogError::Config(format!(
                        "Invalid value for record_noop_removals: '{}'. Expected true or false",
                        value
                    ))
                })?;
            }
            "default_category" => {
                config.default_category = Category::from_str(value).map_err(SkillogError::Config)?;
            }
            _ => return Err(unknown_key(key)),
        }

        self.root.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.root.load_config()
    }
}

fn parse_limit(value: &str) -> Result<Option<usize>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("unbounded") || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(SkillogError::Config(format!(
            "Invalid history_limit: '{}'. Expected a positive integer or 'unbounded'",
            value
        ))),
    }
}

fn unknown_key(key: &str) -> SkillogError {
    SkillogError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
