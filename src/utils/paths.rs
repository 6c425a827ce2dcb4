use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".dealbook";
const HOME_ENV: &str = "DEALBOOK_HOME";
const BOOKS_DIR: &str = "books";
const BACKUP_DIR: &str = "backups";
const BLOBS_DIR: &str = "blobs";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout under the application data root.
pub struct PathResolver;

impl PathResolver {
    /// `$DEALBOOK_HOME` when set, otherwise `~/.dealbook`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn books_dir_in(base: &Path) -> PathBuf {
        base.join(BOOKS_DIR)
    }

    pub fn backups_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn blobs_dir_in(base: &Path) -> PathBuf {
        base.join(BLOBS_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
