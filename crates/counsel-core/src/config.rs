//! Runtime configuration.
//!
//! Loaded from `config.toml` (see `counsel_infrastructure::storage`), then
//! individual values may be overridden from the environment.

use crate::error::{CounselError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_AUTO_REHEARSAL: &str = "COUNSEL_AUTO_REHEARSAL";
pub const ENV_MIN_USER_TURNS: &str = "COUNSEL_MIN_USER_TURNS";
pub const ENV_SAFETY_THRESHOLD: &str = "COUNSEL_SAFETY_THRESHOLD";
pub const ENV_TEMPLATE_DIR: &str = "COUNSEL_TEMPLATE_DIR";
pub const ENV_EXTRA_PATTERNS: &str = "COUNSEL_EXTRA_PATTERNS";

fn default_min_user_turns() -> usize {
    5
}

fn default_safety_threshold() -> f32 {
    0.75
}

fn default_completeness_threshold() -> f32 {
    0.7
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("role_playing_templates")
}

fn default_extra_patterns_path() -> PathBuf {
    PathBuf::from("extreme_patterns.json")
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CounselConfig {
    /// Start rehearsals automatically once the scenario is complete enough.
    #[serde(default)]
    pub auto_rehearsal: bool,
    /// Prior user turns required before an automatic rehearsal.
    #[serde(default = "default_min_user_turns")]
    pub min_user_turns: usize,
    /// Emotion intensity above which the safety routine runs.
    #[serde(default = "default_safety_threshold")]
    pub safety_threshold: f32,
    #[serde(default = "default_completeness_threshold")]
    pub completeness_threshold: f32,
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    #[serde(default = "default_extra_patterns_path")]
    pub extra_patterns_path: PathBuf,
    /// Refuse to start when the template catalog is empty.
    #[serde(default = "default_true")]
    pub require_templates: bool,
}

impl Default for CounselConfig {
    fn default() -> Self {
        Self {
            auto_rehearsal: false,
            min_user_turns: default_min_user_turns(),
            safety_threshold: default_safety_threshold(),
            completeness_threshold: default_completeness_threshold(),
            template_dir: default_template_dir(),
            extra_patterns_path: default_extra_patterns_path(),
            require_templates: true,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| CounselError::config(format!("{name}: cannot parse '{raw}'")))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CounselError::config(format!("{name}: expected a boolean, got '{raw}'"))),
    }
}

impl CounselConfig {
    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup` (an environment-like source).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_AUTO_REHEARSAL) {
            self.auto_rehearsal = parse_bool(ENV_AUTO_REHEARSAL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_USER_TURNS) {
            self.min_user_turns = parse_env(ENV_MIN_USER_TURNS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SAFETY_THRESHOLD) {
            self.safety_threshold = parse_env(ENV_SAFETY_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TEMPLATE_DIR).filter(|v| !v.trim().is_empty()) {
            self.template_dir = PathBuf::from(raw.trim());
        }
        if let Some(raw) = lookup(ENV_EXTRA_PATTERNS).filter(|v| !v.trim().is_empty()) {
            self.extra_patterns_path = PathBuf::from(raw.trim());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("safety_threshold", self.safety_threshold),
            ("completeness_threshold", self.completeness_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CounselError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
