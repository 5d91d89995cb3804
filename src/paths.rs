//! Path utilities for determining data storage locations.
//!
//! All durable data lives under `~/.homely/`: the key-value database and
//! the YAML config file.

use std::path::PathBuf;

/// The base directory name for homely data.
const DATA_DIR_NAME: &str = ".homely";

/// The database filename.
pub const DATABASE_FILENAME: &str = "homely.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory.
///
/// Returns `~/.homely/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the database path, `~/.homely/homely.sqlite3`.
#[must_use]
pub fn db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the config path, `~/.homely/config.yaml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_data_dir() {
        if let (Some(dir), Some(db), Some(cfg)) = (data_dir(), db_path(), config_path()) {
            assert!(db.starts_with(&dir));
            assert!(cfg.starts_with(&dir));
            assert!(db.to_string_lossy().ends_with(DATABASE_FILENAME));
            assert!(cfg.to_string_lossy().ends_with(CONFIG_FILENAME));
        }
    }
}
