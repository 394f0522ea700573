// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::StoreError;
use crate::model::Task;
use crate::serialize::WorkflowDocument;
use async_trait::async_trait;

/// Persistence for the task table.
///
/// Writes are upserts keyed by task id: a task already stored is
/// overwritten in full, a new one is appended. Tasks absent from the batch
/// are left alone.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Every stored task, in storage order.
    async fn fetch_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Upsert `tasks` and return how many were written.
    async fn upsert_all(&self, tasks: &[Task]) -> Result<usize, StoreError>;
}

/// Persistence for workflow documents, keyed by workflow name.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Save `document` under its name, replacing any earlier version.
    async fn save_workflow(&self, document: &WorkflowDocument) -> Result<(), StoreError>;

    async fn load_workflow(&self, name: &str) -> Result<WorkflowDocument, StoreError>;

    /// Names of all saved workflows, sorted.
    async fn list_workflows(&self) -> Result<Vec<String>, StoreError>;
}
