// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::compat::{reconcile_all, ReconcileReport};
use crate::errors::RuleError;
use crate::model::category::Category;
use crate::model::endpoint::{DestinationType, SourceType};
use crate::model::ids::{RuleId, TaskId};
use crate::model::rule::{Rule, RuleKind, RulePatch};
use crate::model::task::Task;
use crate::observability::messages::rules::{RuleKindRejected, RuleNotFound};
use crate::observability::messages::StructuredLog;

/// Newtype wrapper for the ordered task table.
///
/// Every edit that can break source/destination compatibility (a category
/// change, a wholesale replace) runs reconciliation over the table before
/// returning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskTable(pub Vec<Task>);

impl TaskTable {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Replace the whole table, e.g. after a load, and reconcile it.
    pub fn replace(&mut self, tasks: Vec<Task>) -> ReconcileReport {
        self.0 = tasks;
        reconcile_all(&mut self.0)
    }

    /// Add a default task at the head of the table.
    pub fn add_task(&mut self) -> TaskId {
        let task = Task::new();
        let id = task.id.clone();
        self.0.insert(0, task);
        id
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.0.iter().position(|t| &t.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.0.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.0.iter_mut().find(|t| &t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rename(&mut self, id: &TaskId, name: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Change a task's category and restore compatibility across the table.
    /// `None` when no task has `id`.
    pub fn set_category(&mut self, id: &TaskId, category: Category) -> Option<ReconcileReport> {
        self.get_mut(id)?.category = category;
        Some(reconcile_all(&mut self.0))
    }

    pub fn select_source_type(&mut self, id: &TaskId, source_type: SourceType) -> bool {
        self.get_mut(id)
            .is_some_and(|task| task.select_source_type(source_type))
    }

    pub fn select_destination_type(&mut self, id: &TaskId, destination_type: DestinationType) -> bool {
        self.get_mut(id)
            .is_some_and(|task| task.select_destination_type(destination_type))
    }

    /// Set one field of a task's source record. Unknown keys are ignored.
    pub fn patch_source(&mut self, id: &TaskId, key: &str, value: &str) -> bool {
        self.get_mut(id)
            .is_some_and(|task| task.source.set_field(key, value))
    }

    pub fn patch_destination(&mut self, id: &TaskId, key: &str, value: &str) -> bool {
        self.get_mut(id)
            .is_some_and(|task| task.destination.set_field(key, value))
    }

    pub fn add_rule(&mut self, id: &TaskId, kind: RuleKind) -> Result<RuleId, RuleError> {
        let task = self
            .get_mut(id)
            .ok_or_else(|| RuleError::TaskNotFound(id.to_string()))?;

        let result = task.add_rule(kind);
        if result.is_err() {
            RuleKindRejected {
                task_id: id.as_str(),
                kind: &kind.to_string(),
                category: task.category.wire_name(),
            }
            .log();
        }
        result
    }

    /// Patch a rule. A missing rule id is a no-op reported as `Ok(false)`.
    pub fn update_rule(
        &mut self,
        id: &TaskId,
        rule_id: &RuleId,
        patch: &RulePatch,
    ) -> Result<bool, RuleError> {
        let task = self
            .get_mut(id)
            .ok_or_else(|| RuleError::TaskNotFound(id.to_string()))?;

        let found = task.update_rule(rule_id, patch);
        if !found {
            RuleNotFound {
                task_id: id.as_str(),
                rule_id: rule_id.as_str(),
            }
            .log();
        }
        Ok(found)
    }

    pub fn remove_rule(&mut self, id: &TaskId, rule_id: &RuleId) -> Result<Option<Rule>, RuleError> {
        let task = self
            .get_mut(id)
            .ok_or_else(|| RuleError::TaskNotFound(id.to_string()))?;
        Ok(task.remove_rule(rule_id))
    }
}

impl From<Vec<Task>> for TaskTable {
    fn from(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }
}

impl From<TaskTable> for Vec<Task> {
    fn from(table: TaskTable) -> Self {
        table.0
    }
}
