//! File locations for the technique catalog and the feedback log

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Technique library (JSON, or YAML by extension)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Append-only CSV feedback log
    #[serde(default = "default_feedback_log_path")]
    pub feedback_log_path: PathBuf,

    /// Entries shown by the recent-feedback listing when no limit is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("catalog_path"));
        }
        if self.feedback_log_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("feedback_log_path"));
        }
        if self.recent_limit == 0 || self.recent_limit > 100 {
            return Err(ValidationError::InvalidRecentLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            feedback_log_path: default_feedback_log_path(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("techniques_library.json")
}

fn default_feedback_log_path() -> PathBuf {
    PathBuf::from("feedback_data.csv")
}

fn default_recent_limit() -> usize {
    5
}
