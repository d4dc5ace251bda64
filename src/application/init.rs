//! Initialize log root use case

use crate::domain::Category;
use crate::error::Result;
use crate::infrastructure::{Config, LogRoot};
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Create `.skillog/` at `path` with a default config
    pub fn execute(path: &Path, default_category: Category) -> Result<LogRoot> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let root = LogRoot::new(path.to_path_buf());
        root.initialize()?;

        let config = Config {
            default_category,
            ..Config::default()
        };
        root.save_config(&config)?;

        Ok(root)
    }
}
