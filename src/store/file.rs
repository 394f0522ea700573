// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A store backed by a directory of JSON files.
//!
//! ```text
//! <directory>/
//!   tasks.json              array of stored tasks, rules as text
//!   workflows/<name>.json   one canonical document per workflow
//! ```

use crate::errors::StoreError;
use crate::model::Task;
use crate::serialize::{raw_records, StoredTask, TaskBatch, WorkflowDocument};
use crate::store::{upsert_by_id, validate_workflow_name};
use crate::traits::{TaskStore, WorkflowStore};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const TASKS_FILE: &str = "tasks.json";
const WORKFLOWS_DIR: &str = "workflows";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn tasks_path(&self) -> PathBuf {
        self.directory.join(TASKS_FILE)
    }

    fn workflows_dir(&self) -> PathBuf {
        self.directory.join(WORKFLOWS_DIR)
    }

    fn workflow_path(&self, name: &str) -> PathBuf {
        self.workflows_dir().join(format!("{}.json", name))
    }

    /// Records currently on disk, undecoded, or empty when the file does not
    /// exist yet.
    async fn read_records(&self) -> Result<Vec<serde_json::Value>, StoreError> {
        let path = self.tasks_path();
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(raw_records(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

async fn write_file(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    fs::write(path, content)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        let records = self.read_records().await?;
        Ok(TaskBatch::from_records(records).tasks)
    }

    /// Records this build cannot decode are written back as they were read.
    async fn upsert_all(&self, tasks: &[Task]) -> Result<usize, StoreError> {
        let incoming = tasks
            .iter()
            .map(|task| serde_json::to_value(StoredTask::from_task(task)?))
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = self.read_records().await?;
        upsert_by_id(&mut records, incoming);

        let content = serde_json::to_string_pretty(&records)?;
        write_file(&self.tasks_path(), &content).await?;
        Ok(tasks.len())
    }
}

#[async_trait]
impl WorkflowStore for JsonFileStore {
    async fn save_workflow(&self, document: &WorkflowDocument) -> Result<(), StoreError> {
        validate_workflow_name(&document.name)?;
        let content = serde_json::to_string_pretty(document)?;
        write_file(&self.workflow_path(&document.name), &content).await
    }

    async fn load_workflow(&self, name: &str) -> Result<WorkflowDocument, StoreError> {
        validate_workflow_name(name)?;
        let path = self.workflow_path(name);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::WorkflowNotFound(name.to_string()))
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn list_workflows(&self) -> Result<Vec<String>, StoreError> {
        let dir = self.workflows_dir();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, RuleKind, RulePatch};
    use serde_json::json;
    use tempfile::TempDir;

    fn task(id: &str, name: &str) -> Task {
        let mut task = Task::new();
        task.id = id.into();
        task.name = name.to_string();
        task
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("not-yet-created"));

        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(store.list_workflows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tasks_are_upserted_with_rules_as_text() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut transform = task("t2", "clean");
        transform.category = Category::Transform;
        let rule = transform.add_rule(RuleKind::Filter).unwrap();
        transform.update_rule(&rule, &RulePatch::new().with("expression", "qty > 0"));

        store.upsert_all(&[task("t1", "load"), transform.clone()]).await.unwrap();
        store.upsert_all(&[task("t1", "load v2")]).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("tasks.json")).unwrap())
                .unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 2);
        assert!(raw[1]["rules"].is_string());

        let fetched = store.fetch_all().await.unwrap();
        assert_eq!(fetched[0].name, "load v2");
        assert_eq!(fetched[1], transform);
    }

    #[tokio::test]
    async fn test_workflow_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        for name in ["weekly", "nightly"] {
            let document = WorkflowDocument {
                name: name.to_string(),
                ..WorkflowDocument::default()
            };
            store.save_workflow(&document).await.unwrap();
        }
        std::fs::write(dir.path().join("workflows").join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list_workflows().await.unwrap(), vec!["nightly", "weekly"]);
        assert_eq!(store.load_workflow("nightly").await.unwrap().name, "nightly");
        assert!(matches!(
            store.load_workflow("monthly").await,
            Err(StoreError::WorkflowNotFound(_))
        ));
        assert!(matches!(
            store.load_workflow("../tasks").await,
            Err(StoreError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_saving_leaves_other_records_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let existing = vec![
            json!({
                "id": "x", "name": "pivot", "type": "transform",
                "source": {"type": "mssql"}, "destination": {"type": "mssql"},
                "rules": "[{\"id\":\"r1\",\"kind\":\"pivot\"}]"
            }),
            json!({
                "id": "y", "name": "copy", "type": "db_to_db",
                "source": {"type": "json"}, "destination": {"type": "postgres"},
                "rules": "[]"
            }),
            json!({"id": "v", "type": "ftp_to_db"}),
        ];
        std::fs::write(&path, serde_json::to_string(&existing).unwrap()).unwrap();
        let store = JsonFileStore::new(dir.path());

        store.upsert_all(&[task("z", "new")]).await.unwrap();

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[..3], existing[..]);
        assert_eq!(raw[3]["id"], "z");

        let fetched: Vec<String> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(fetched, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_corrupt_tasks_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "{ not json").unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(store.fetch_all().await, Err(StoreError::Json(_))));
    }
}
