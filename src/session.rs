// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The editor session: all application state in one owned value.
//!
//! The session holds the task table, the workflow canvas, the field schemas
//! and the settings. Edits go through the parts directly and are
//! synchronous. Saving and loading are the only async operations; they
//! never fail outward. A failed save leaves the session untouched and
//! returns an error notification, and a failed load falls back to empty.

use crate::compat::ReconcileReport;
use crate::config::EditorSettings;
use crate::errors::{ConfigError, GraphError};
use crate::graph::WorkflowGraph;
use crate::model::{NodeId, TaskTable};
use crate::observability::messages::store::{
    LoadFellBack, SaveFailed, SaveStarted, SaveSucceeded,
};
use crate::observability::messages::StructuredLog;
use crate::schema::{Form, SchemaRegistry};
use crate::traits::{TaskStore, WorkflowStore};
use std::time::Duration;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user. It dismisses itself after `ttl`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            ttl,
        }
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            ttl,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    tasks: TaskTable,
    graph: WorkflowGraph,
    schemas: SchemaRegistry,
    settings: EditorSettings,
}

impl EditorSession {
    pub fn new(settings: EditorSettings, schemas: SchemaRegistry) -> Self {
        let graph = WorkflowGraph::new(&settings.workflow_name, settings.canvas);
        Self {
            tasks: TaskTable::new(),
            graph,
            schemas,
            settings,
        }
    }

    /// Build a session, loading field schemas from the path in `settings`
    /// or the builtin table.
    pub fn from_settings(settings: EditorSettings) -> Result<Self, ConfigError> {
        let schemas = SchemaRegistry::load_or_builtin(settings.schemas.path.as_deref())?;
        Ok(Self::new(settings, schemas))
    }

    pub fn tasks(&self) -> &TaskTable {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskTable {
        &mut self.tasks
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut WorkflowGraph {
        &mut self.graph
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The form for a task node on the canvas.
    pub fn node_form(&self, id: &NodeId) -> Result<Form, GraphError> {
        self.graph.form_for(id, &self.schemas)
    }

    pub fn submit_node_form(&mut self, id: &NodeId, form: &Form) -> Result<(), GraphError> {
        self.graph.configure_node(id, &form.values())
    }

    /// Upsert the whole task table.
    pub async fn save_tasks<S>(&self, store: &S) -> Notification
    where
        S: TaskStore + ?Sized,
    {
        let ttl = self.settings.notifications.table_ttl();
        let started = SaveStarted {
            target: "tasks",
            record_count: self.tasks.len(),
        };
        let span = started.span("save_tasks");
        started.log();

        match store
            .upsert_all(self.tasks.as_slice())
            .instrument(span)
            .await
        {
            Ok(count) => {
                SaveSucceeded {
                    target: "tasks",
                    record_count: count,
                }
                .log();
                Notification::success("Saved!", ttl)
            }
            Err(e) => {
                SaveFailed {
                    target: "tasks",
                    error: &e,
                }
                .log();
                Notification::error(format!("Could not save tasks: {}", e), ttl)
            }
        }
    }

    /// Replace the table with the stored tasks, reconciled. An unreachable
    /// store yields an empty table.
    pub async fn load_tasks<S>(&mut self, store: &S) -> ReconcileReport
    where
        S: TaskStore + ?Sized,
    {
        let tasks = match store.fetch_all().await {
            Ok(tasks) => tasks,
            Err(e) => {
                LoadFellBack {
                    target: "tasks",
                    error: &e,
                }
                .log();
                Vec::new()
            }
        };
        self.tasks.replace(tasks)
    }

    /// Save the canvas as a workflow document under the graph's name.
    pub async fn save_workflow<S>(&self, store: &S) -> Notification
    where
        S: WorkflowStore + ?Sized,
    {
        let ttl = self.settings.notifications.workflow_ttl();
        let document = self.graph.to_document();
        let started = SaveStarted {
            target: "workflow",
            record_count: document.nodes.len() + document.edges.len(),
        };
        let span = started.span("save_workflow");
        started.log();

        match store.save_workflow(&document).instrument(span).await {
            Ok(()) => {
                SaveSucceeded {
                    target: "workflow",
                    record_count: started.record_count,
                }
                .log();
                Notification::success(format!("Workflow '{}' saved", document.name), ttl)
            }
            Err(e) => {
                SaveFailed {
                    target: "workflow",
                    error: &e,
                }
                .log();
                Notification::error(format!("Could not save workflow: {}", e), ttl)
            }
        }
    }

    /// Replace the canvas with a stored workflow. On failure the canvas is
    /// left as it was and an error notification is returned.
    pub async fn load_workflow<S>(&mut self, store: &S, name: &str) -> Notification
    where
        S: WorkflowStore + ?Sized,
    {
        let ttl = self.settings.notifications.workflow_ttl();
        match store.load_workflow(name).await {
            Ok(document) => {
                self.graph = WorkflowGraph::from_document(&document, self.settings.canvas);
                Notification::success(format!("Workflow '{}' loaded", name), ttl)
            }
            Err(e) => {
                LoadFellBack {
                    target: "workflow",
                    error: &e,
                }
                .log();
                Notification::error(format!("Could not load workflow: {}", e), ttl)
            }
        }
    }

    /// Saved workflow names, or none when the store is unreachable.
    pub async fn list_workflows<S>(&self, store: &S) -> Vec<String>
    where
        S: WorkflowStore + ?Sized,
    {
        match store.list_workflows().await {
            Ok(names) => names,
            Err(e) => {
                LoadFellBack {
                    target: "workflow list",
                    error: &e,
                }
                .log();
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;
    use crate::model::Category;
    use crate::store::MemoryStore;

    fn session() -> EditorSession {
        EditorSession::new(EditorSettings::default(), SchemaRegistry::default())
    }

    #[tokio::test]
    async fn test_save_tasks_notifies() {
        let mut session = session();
        session.tasks_mut().add_task();

        let store = MemoryStore::new();
        let note = session.save_tasks(&store).await;
        assert_eq!(note.level, NotificationLevel::Success);
        assert_eq!(note.ttl, Duration::from_millis(2300));
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_alone() {
        let mut session = session();
        let id = session.tasks_mut().add_task();
        let before = session.tasks().clone();

        let note = session.save_tasks(&MemoryStore::offline()).await;
        assert!(note.is_error());
        assert_eq!(session.tasks(), &before);
        assert!(session.tasks().get(&id).is_some());
    }

    #[tokio::test]
    async fn test_load_tasks_falls_back_to_empty() {
        let mut session = session();
        session.tasks_mut().add_task();

        let report = session.load_tasks(&MemoryStore::offline()).await;
        assert!(report.is_clean());
        assert!(session.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_workflow_save_and_load() {
        let mut session = session();
        let store = MemoryStore::new();
        session
            .graph_mut()
            .add_task(Category::DbToDb, "copy", Position::new(10.0, 10.0));

        let note = session.save_workflow(&store).await;
        assert!(!note.is_error(), "{}", note.message);
        assert_eq!(note.ttl, Duration::from_millis(5000));

        let saved = session.graph().clone();
        session.graph_mut().set_name("scratch");
        let note = session.load_workflow(&store, "Untitled Workflow").await;
        assert!(!note.is_error());
        assert_eq!(session.graph(), &saved);

        let note = session.load_workflow(&store, "missing").await;
        assert!(note.is_error());
        assert_eq!(session.graph(), &saved);

        assert_eq!(
            session.list_workflows(&store).await,
            vec!["Untitled Workflow"]
        );
        assert!(session.list_workflows(&MemoryStore::offline()).await.is_empty());
    }
}
