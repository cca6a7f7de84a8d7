//! Path resolution for counsel configuration files.

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for counsel_core::CounselError {
    fn from(err: PathError) -> Self {
        counsel_core::CounselError::config(err.to_string())
    }
}

/// Path management for counsel.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/counsel/           # Config directory (platform default)
/// └── config.toml              # Runtime configuration
/// ```
///
/// Template and pattern paths from the config are used as given; relative
/// paths resolve against the working directory.
#[derive(Debug, Clone, Default)]
pub struct CounselPaths {
    base_dir: Option<PathBuf>,
}

impl CounselPaths {
    /// Creates a path resolver; `base_dir` overrides the platform config
    /// directory (used by tests).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the counsel configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/counsel/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join("counsel"))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }
}
