//! TOML config file storage.
//!
//! Reads and writes one TOML file. Writes go through a temporary file and an
//! atomic rename so a crash never leaves a half-written config.

use counsel_core::error::{CounselError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// A TOML file holding one serde value.
///
/// Does NOT know about specific entities; callers pick the type.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new config storage handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the config file (usually a .toml file)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Serializes `data` and writes it atomically.
    pub fn save<T: Serialize>(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data).map_err(|e| CounselError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CounselError::io(format!("Path has no file name: {}", self.path.display())))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nested").join("test.toml"));

        let data = Sample {
            name: "test".into(),
            count: 42,
        };
        storage.save(&data).unwrap();

        let loaded: Sample = storage.load().unwrap().unwrap();
        assert_eq!(loaded, data);
        assert!(!temp_dir.path().join("nested").join(".test.toml.tmp").exists());
    }

    #[test]
    fn test_load_nonexistent_or_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("nonexistent.toml"));
        assert!(storage.load::<Sample>().unwrap().is_none());

        let empty = temp_dir.path().join("empty.toml");
        fs::write(&empty, "  \n").unwrap();
        assert!(ConfigStorage::new(empty).load::<Sample>().unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "name = ").unwrap();
        let err = ConfigStorage::new(path).load::<Sample>().unwrap_err();
        assert!(err.is_serialization());
    }
}
