//! Configuration for parallel index builds.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexIndexError, Result};
use crate::index::store::DEFAULT_SHARD_COUNT;

/// What a build does when a document cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first unreadable document fails the whole build and the index
    /// stays not-ready.
    #[default]
    FailFast,

    /// Unreadable documents are logged, reported and left out of the index.
    SkipUnreadable,
}

/// Configuration for the parallel index engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Directory whose files are indexed.
    pub root: PathBuf,

    /// Worker count used when the caller does not pass one.
    pub default_workers: usize,

    /// Upper bound on workers, as a multiple of the available cores.
    pub max_workers_per_core: usize,

    /// Behavior on unreadable documents.
    pub failure_policy: FailurePolicy,

    /// Number of lock shards in the index store.
    pub shard_count: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Input"),
            default_workers: 1,
            max_workers_per_core: 8,
            failure_policy: FailurePolicy::FailFast,
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }
}

impl IndexerConfig {
    /// Create a configuration for `root` with default settings.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LexIndexError::io(path, e))?;
        let config: IndexerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the default worker count.
    pub fn with_default_workers(mut self, workers: usize) -> Self {
        self.default_workers = workers;
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the number of store shards.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Largest worker count a build accepts on this machine.
    pub fn max_workers(&self) -> usize {
        num_cpus::get().saturating_mul(self.max_workers_per_core)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers_per_core == 0 {
            return Err(LexIndexError::invalid_argument(
                "max_workers_per_core must be greater than 0",
            ));
        }
        if self.shard_count == 0 {
            return Err(LexIndexError::invalid_argument(
                "shard_count must be greater than 0",
            ));
        }
        if self.default_workers == 0 || self.default_workers > self.max_workers() {
            return Err(LexIndexError::invalid_argument(format!(
                "default_workers must be between 1 and {}",
                self.max_workers()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = IndexerConfig::default();
        assert_eq!(config.root, PathBuf::from("Input"));
        assert_eq!(config.default_workers, 1);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.max_workers(), num_cpus::get() * 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = IndexerConfig::default().with_default_workers(0);
        assert!(matches!(
            config.validate(),
            Err(LexIndexError::InvalidArgument(_))
        ));

        let config = IndexerConfig::default().with_shard_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "root": "docs", "failure_policy": "skip_unreadable" }}"#
        )
        .unwrap();

        let config = IndexerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.root, PathBuf::from("docs"));
        assert_eq!(config.failure_policy, FailurePolicy::SkipUnreadable);
        assert_eq!(config.default_workers, 1);
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            IndexerConfig::from_json_file(file.path()),
            Err(LexIndexError::Json(_))
        ));
    }
}
