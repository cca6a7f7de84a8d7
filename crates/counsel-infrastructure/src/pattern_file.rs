//! Supplementary risk-pattern file.
//!
//! Two shapes are accepted:
//!
//! ```json
//! ["극단적\\s*선택", "힘들어\\s*죽겠"]
//! ```
//!
//! which adds uncategorized patterns (recorded, never safety-relevant), or
//!
//! ```json
//! { "suicide": ["극단적\\s*선택"], "seed": ["..."] }
//! ```
//!
//! which appends to named categories.

use counsel_core::error::{CounselError, Result};
use counsel_core::risk::{PatternSupplement, RiskCategory};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct PatternFile {
    path: PathBuf,
}

fn pattern_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item.as_str() {
                Some(s) if !s.trim().is_empty() => Some(s.to_string()),
                _ => {
                    tracing::warn!("Ignoring non-string risk pattern entry: {}", item);
                    None
                }
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

impl PatternFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file. A missing file is an empty supplement.
    pub fn load(&self) -> Result<PatternSupplement> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No supplementary pattern file");
            return Ok(PatternSupplement::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::parse(&value)
    }

    pub fn parse(value: &Value) -> Result<PatternSupplement> {
        match value {
            Value::Array(_) => Ok(PatternSupplement {
                by_category: Vec::new(),
                uncategorized: pattern_list(value),
            }),
            Value::Object(map) => {
                let mut by_category = Vec::new();
                for (name, patterns) in map {
                    match RiskCategory::from_str(name.trim()) {
                        Ok(category) => by_category.push((category, pattern_list(patterns))),
                        Err(_) => tracing::warn!(category = %name, "Unknown risk category in pattern file"),
                    }
                }
                Ok(PatternSupplement {
                    by_category,
                    uncategorized: Vec::new(),
                })
            }
            _ => Err(CounselError::Serialization {
                format: "JSON".to_string(),
                message: "pattern file must be an array or an object".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_array_goes_to_uncategorized() {
        let supplement = PatternFile::parse(&json!(["a+", 3, "", "b"])).unwrap();
        assert_eq!(supplement.uncategorized, vec!["a+".to_string(), "b".to_string()]);
        assert!(supplement.by_category.is_empty());
    }

    #[test]
    fn test_object_goes_to_named_categories() {
        let supplement = PatternFile::parse(&json!({
            "suicide": ["극단적\\s*선택"],
            "self_denigrate": "나는 바보",
            "nonsense": ["x"]
        }))
        .unwrap();
        assert_eq!(
            supplement.patterns_for(RiskCategory::Suicide),
            vec!["극단적\\s*선택"]
        );
        assert_eq!(
            supplement.patterns_for(RiskCategory::SelfDenigrate),
            vec!["나는 바보"]
        );
        assert_eq!(supplement.by_category.len(), 2);
    }

    #[test]
    fn test_scalar_is_rejected() {
        assert!(PatternFile::parse(&json!(1)).unwrap_err().is_serialization());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let supplement = PatternFile::new(temp_dir.path().join("none.json")).load().unwrap();
        assert!(supplement.is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("extreme_patterns.json");
        std::fs::write(&path, r#"["힘들어\\s*죽겠"]"#).unwrap();
        let supplement = PatternFile::new(&path).load().unwrap();
        assert_eq!(supplement.uncategorized.len(), 1);
    }
}
