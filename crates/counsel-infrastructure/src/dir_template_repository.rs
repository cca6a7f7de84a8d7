//! Directory-backed template store.
//!
//! Every `*.json` file in the directory holds a JSON array of templates (a
//! single template object is accepted too). Files are read in file-name
//! order so the catalog order is stable across platforms.
//!
//! ```text
//! role_playing_templates/
//! ├── trig_a_past.json
//! ├── trig_b_future.json
//! └── self_d_ideal.json
//! ```

use counsel_core::error::{CounselError, Result};
use counsel_core::template::{Template, TemplateCatalog, TemplateRepository};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct DirTemplateRepository {
    dir: PathBuf,
}

impl DirTemplateRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn json_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read_file(path: &Path) -> Result<Vec<Template>> {
        let content = tokio::fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(&content)?;
        let templates = match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value::<Template>)
                .collect::<std::result::Result<Vec<_>, _>>()?,
            object @ Value::Object(_) => vec![serde_json::from_value(object)?],
            other => {
                return Err(CounselError::Serialization {
                    format: "JSON".to_string(),
                    message: format!("expected an array of templates, found {}", kind_of(&other)),
                });
            }
        };
        Ok(templates)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl TemplateRepository for DirTemplateRepository {
    async fn load_catalog(&self) -> Result<TemplateCatalog> {
        if !self.dir.is_dir() {
            tracing::warn!(dir = %self.dir.display(), "Template directory not found");
            return Ok(TemplateCatalog::empty());
        }

        let files = self.json_files().await?;
        if files.is_empty() {
            tracing::warn!(dir = %self.dir.display(), "No template files found");
        }

        let mut templates = Vec::new();
        for path in files {
            match Self::read_file(&path).await {
                Ok(loaded) => {
                    tracing::info!(file = %path.display(), count = loaded.len(), "Loaded templates");
                    templates.extend(loaded);
                }
                Err(err) => {
                    tracing::warn!(file = %path.display(), "Skipping template file: {}", err);
                }
            }
        }

        Ok(TemplateCatalog::new(templates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_loads_all_json_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "b.json",
            r#"[{"id": "TRIG-B-001", "title": "면접 연습"}]"#,
        );
        write(
            temp_dir.path(),
            "a.json",
            r#"[{"id": "TRIG-A-001"}, {"id": "TRIG-A-002"}]"#,
        );
        write(temp_dir.path(), "notes.txt", "not a template");

        let catalog = DirTemplateRepository::new(temp_dir.path())
            .load_catalog()
            .await
            .unwrap();
        let ids: Vec<_> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["TRIG-A-001", "TRIG-A-002", "TRIG-B-001"]);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "good.json", r#"[{"id": "SELF-D01"}]"#);
        write(temp_dir.path(), "broken.json", "[{");
        write(temp_dir.path(), "wrong.json", r#""just a string""#);
        write(temp_dir.path(), "missing_id.json", r#"[{"title": "no id"}]"#);

        let catalog = DirTemplateRepository::new(temp_dir.path())
            .load_catalog()
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("SELF-D01").is_some());
    }

    #[tokio::test]
    async fn test_single_object_file() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "one.json", r#"{"id": "TRIG-C-001"}"#);
        let catalog = DirTemplateRepository::new(temp_dir.path())
            .load_catalog()
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_directory_gives_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = DirTemplateRepository::new(temp_dir.path().join("absent"))
            .load_catalog()
            .await
            .unwrap();
        assert!(catalog.is_empty());
    }
}
