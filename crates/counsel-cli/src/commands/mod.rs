pub mod chat;
pub mod check_risk;
pub mod config;
pub mod templates;

use anyhow::Result;
use counsel_core::config::CounselConfig;
use counsel_infrastructure::{CounselPaths, TomlConfigRepository};
use std::path::Path;

fn repository(config_path: Option<&Path>) -> Result<TomlConfigRepository> {
    Ok(match config_path {
        Some(path) => TomlConfigRepository::new(path.to_path_buf()),
        None => TomlConfigRepository::from_paths(&CounselPaths::new(None))?,
    })
}

/// Config file merged with environment overrides.
pub(crate) fn load_config(config_path: Option<&Path>) -> Result<CounselConfig> {
    Ok(repository(config_path)?.load_effective()?)
}
