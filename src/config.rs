//! Where the catalog keeps its files. There are no flags or settings files;
//! everything lives in a dot-directory under the user's home.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".personal-library";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";
/// Log file written next to the database; the terminal belongs to the UI.
const LOG_FILE_NAME: &str = "library.log";

/// Resolved runtime paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve the default layout inside the user's home directory.
    pub fn load() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Same file layout rooted at an arbitrary directory.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            db_path: dir.join(DB_FILE_NAME),
            log_path: dir.join(LOG_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_share_the_data_directory() {
        let config = Config::with_data_dir("/tmp/books");
        assert_eq!(config.db_path, Path::new("/tmp/books/library.sqlite"));
        assert_eq!(config.log_path, Path::new("/tmp/books/library.log"));
    }
}
