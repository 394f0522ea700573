// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::StoreError;
use crate::model::Task;
use crate::serialize::{StoredTask, WorkflowDocument};
use crate::store::{upsert_by_id, validate_workflow_name};
use crate::traits::{TaskStore, WorkflowStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process store. Records go through the same stored encoding as the
/// file store, so rule text handling is exercised here too.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<StoredTask>>,
    workflows: RwLock<BTreeMap<String, WorkflowDocument>>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, standing in for an unreachable
    /// backend.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        self.check_online()?;
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().cloned().map(StoredTask::into_task).collect())
    }

    async fn upsert_all(&self, tasks: &[Task]) -> Result<usize, StoreError> {
        self.check_online()?;
        let incoming = tasks
            .iter()
            .map(StoredTask::from_task)
            .collect::<Result<Vec<_>, _>>()?;

        let mut stored = self.tasks.write().await;
        upsert_by_id(&mut stored, incoming);
        Ok(tasks.len())
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn save_workflow(&self, document: &WorkflowDocument) -> Result<(), StoreError> {
        self.check_online()?;
        validate_workflow_name(&document.name)?;
        self.workflows
            .write()
            .await
            .insert(document.name.clone(), document.clone());
        Ok(())
    }

    async fn load_workflow(&self, name: &str) -> Result<WorkflowDocument, StoreError> {
        self.check_online()?;
        self.workflows
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::WorkflowNotFound(name.to_string()))
    }

    async fn list_workflows(&self) -> Result<Vec<String>, StoreError> {
        self.check_online()?;
        Ok(self.workflows.read().await.keys().cloned().collect())
    }
}
