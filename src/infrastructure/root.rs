//! Log root discovery and on-disk layout
//!
//! A log root is any directory holding a `.skillog/` directory:
//!
//! ```text
//! <root>/.skillog/config.toml
//! <root>/.skillog/store/<key>.json
//! ```

use crate::error::{Result, SkillogError};
use crate::infrastructure::durable::FileStore;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

pub const SKILLOG_DIR: &str = ".skillog";
pub const STORE_DIR: &str = "store";
pub const ROOT_ENV: &str = "SKILLOG_ROOT";

/// A directory containing a `.skillog/` directory
#[derive(Debug, Clone)]
pub struct LogRoot {
    pub root: PathBuf,
}

impl LogRoot {
    pub fn new(root: PathBuf) -> Self {
        LogRoot { root }
    }

    /// Discover the log root.
    /// First checks SKILLOG_ROOT, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_skillog_dir(&path) {
                return Ok(LogRoot::new(path));
            } else {
                return Err(SkillogError::Config(format!(
                    "SKILLOG_ROOT is set to '{}' but no .skillog directory found. \
                    Run 'skillog init' in that directory or unset SKILLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory with `.skillog/` is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_skillog_dir(&current) {
                return Ok(LogRoot::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(SkillogError::NotSkillogDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_skillog_dir(path: &Path) -> bool {
        path.join(SKILLOG_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_skillog_dir(&self.root)
    }

    /// Create `.skillog/` and its store directory
    pub fn initialize(&self) -> Result<()> {
        let skillog_dir = self.root.join(SKILLOG_DIR);

        if skillog_dir.exists() {
            return Err(SkillogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(skillog_dir.join(STORE_DIR))?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Durable store rooted at `.skillog/store`
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root.join(SKILLOG_DIR).join(STORE_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn test_initialize_creates_layout() {
        let temp = TempDir::new().unwrap();
        let root = LogRoot::new(temp.path().to_path_buf());

        assert!(!root.is_initialized());
        root.initialize().unwrap();

        assert!(root.is_initialized());
        assert!(temp.path().join(".skillog/store").is_dir());
        assert_eq!(root.store().root(), temp.path().join(".skillog/store"));
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let root = LogRoot::new(temp.path().to_path_buf());

        root.initialize().unwrap();
        assert!(matches!(root.initialize(), Err(SkillogError::Config(_))));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".skillog")).unwrap();

        let subdir = temp.path().join("sub").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let root = LogRoot::discover_from(&subdir).unwrap();
        assert_eq!(root.root, temp.path());
    }

    #[test]
    fn test_discover_fails_without_skillog_dir() {
        let temp = TempDir::new().unwrap();

        match LogRoot::discover_from(temp.path()) {
            Err(SkillogError::NotSkillogDirectory(path)) => assert_eq!(path, temp.path()),
            other => panic!("Expected NotSkillogDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_with_root_env() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".skillog")).unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        let root = LogRoot::discover().unwrap();
        assert_eq!(root.root, temp.path());
    }

    #[test]
    fn test_discover_root_env_not_initialized() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture(ROOT_ENV);

        let temp = TempDir::new().unwrap();
        std::env::set_var(ROOT_ENV, temp.path());

        match LogRoot::discover() {
            Err(SkillogError::Config(msg)) => assert!(msg.contains("no .skillog directory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
