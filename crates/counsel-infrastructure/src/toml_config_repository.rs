//! TOML-backed configuration loading.

use crate::paths::CounselPaths;
use crate::storage::ConfigStorage;
use counsel_core::config::CounselConfig;
use counsel_core::error::Result;
use std::path::{Path, PathBuf};

/// Loads and saves [`CounselConfig`] from `config.toml`.
#[derive(Debug, Clone)]
pub struct TomlConfigRepository {
    storage: ConfigStorage,
}

impl TomlConfigRepository {
    /// Repository over the default config file.
    pub fn from_paths(paths: &CounselPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn new(path: PathBuf) -> Self {
        Self {
            storage: ConfigStorage::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// The file contents, or defaults when the file is absent.
    pub fn load_or_default(&self) -> Result<CounselConfig> {
        match self.storage.load::<CounselConfig>()? {
            Some(config) => {
                config.validate()?;
                tracing::debug!(path = %self.storage.path().display(), "Loaded config");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %self.storage.path().display(), "No config file, using defaults");
                Ok(CounselConfig::default())
            }
        }
    }

    /// File contents (or defaults) with environment overrides applied.
    pub fn load_effective(&self) -> Result<CounselConfig> {
        self.load_or_default()?.with_env_overrides()
    }

    pub fn save(&self, config: &CounselConfig) -> Result<()> {
        self.storage.save(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlConfigRepository::from_paths(&CounselPaths::new(Some(temp_dir.path()))).unwrap();
        assert_eq!(repo.load_or_default().unwrap(), CounselConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlConfigRepository::new(temp_dir.path().join("config.toml"));
        let config = CounselConfig {
            auto_rehearsal: true,
            min_user_turns: 2,
            ..CounselConfig::default()
        };
        repo.save(&config).unwrap();
        assert_eq!(repo.load_or_default().unwrap(), config);
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "safety_threshold = 2.0\n").unwrap();
        let err = TomlConfigRepository::new(path).load_or_default().unwrap_err();
        assert!(err.is_config());
    }
}
