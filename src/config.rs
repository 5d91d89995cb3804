//! Application configuration.
//!
//! Stored as YAML at `~/.homely/config.yaml`. Missing file means defaults;
//! a present but invalid file is an error the caller surfaces.

use crate::error::Result;
use crate::lifecycle::SiblingMatching;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default minutes between periodic notification refreshes.
const DEFAULT_REFRESH_MINUTES: u64 = 5;

/// User-adjustable settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// How recurring-task siblings are matched on un-completion.
    #[serde(default)]
    pub sibling_matching: SiblingMatching,

    /// Minutes between periodic notification refreshes. The timer itself is
    /// run by the host; this is the advisory interval.
    #[serde(default = "default_refresh_minutes")]
    pub notification_refresh_minutes: u64,
}

const fn default_refresh_minutes() -> u64 {
    DEFAULT_REFRESH_MINUTES
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sibling_matching: SiblingMatching::default(),
            notification_refresh_minutes: DEFAULT_REFRESH_MINUTES,
        }
    }
}

impl AppConfig {
    /// Load config from a specific path, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
