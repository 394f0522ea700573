// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The task table on the wire and at rest.
//!
//! Outbound, a batch is `{"tasks": [...]}`. Inbound, a bare array is
//! accepted as well. At the storage boundary each task's rules are held as
//! JSON text ([`StoredTask`]); inbound records may carry either form.

use crate::compat::{default_destination, default_source};
use crate::model::{Category, Destination, RuleSet, Schedule, Source, Task, TaskId};
use crate::observability::messages::store::{EndpointDefaulted, RecordSkipped, RulesDiscarded};
use crate::observability::messages::StructuredLog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskBatch {
    pub tasks: Vec<Task>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchShape {
    Bare(Vec<serde_json::Value>),
    Wrapped { tasks: Vec<serde_json::Value> },
}

impl TaskBatch {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Decode a batch. Only a document that is neither an array nor
    /// `{tasks: [...]}` is an error; individual records that cannot be read
    /// are logged and skipped.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_records(raw_records(json)?))
    }

    pub fn from_records(records: Vec<serde_json::Value>) -> Self {
        let tasks = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                match serde_json::from_value::<TaskRecord>(record) {
                    Ok(record) => Some(record.into_task()),
                    Err(e) => {
                        RecordSkipped {
                            index,
                            reason: &e.to_string(),
                        }
                        .log();
                        None
                    }
                }
            })
            .collect();
        Self { tasks }
    }
}

/// The undecoded records of a batch document, in either accepted shape.
pub fn raw_records(json: &str) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    Ok(match serde_json::from_str::<BatchShape>(json)? {
        BatchShape::Bare(records) => records,
        BatchShape::Wrapped { tasks } => tasks,
    })
}

/// A task as persisted: identical to [`Task`] except that `rules` is JSON
/// text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub id: TaskId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub source: Source,
    pub destination: Destination,
    pub rules: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl StoredTask {
    pub fn from_task(task: &Task) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: task.id.clone(),
            name: task.name.clone(),
            category: task.category,
            source: task.source.clone(),
            destination: task.destination.clone(),
            rules: serde_json::to_string(&task.rules)?,
            schedule: task.schedule.clone(),
        })
    }

    /// Rebuild the task. Unreadable rule text loads as an empty rule list.
    pub fn into_task(self) -> Task {
        let rules = decode_rules(&self.id, &self.rules);
        Task {
            id: self.id,
            name: self.name,
            category: self.category,
            source: self.source,
            destination: self.destination,
            rules,
            schedule: self.schedule,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordRules {
    Encoded(String),
    Inline(RuleSet),
}

impl Default for RecordRules {
    fn default() -> Self {
        RecordRules::Inline(RuleSet::new())
    }
}

/// Inbound record that accepts both rule encodings. Only the id and the
/// category are required; an unreadable source or destination is replaced
/// by the category's default.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", alias = "taskType")]
    category: Category,
    #[serde(default)]
    source: serde_json::Value,
    #[serde(default)]
    destination: serde_json::Value,
    #[serde(default)]
    rules: Option<RecordRules>,
    #[serde(default)]
    schedule: Option<Schedule>,
}

impl TaskRecord {
    fn into_task(self) -> Task {
        let rules = match self.rules.unwrap_or_default() {
            RecordRules::Inline(rules) => rules,
            RecordRules::Encoded(text) => decode_rules(&self.id, &text),
        };
        let source = match Source::deserialize(&self.source) {
            Ok(source) => source,
            Err(e) => {
                let source = default_source(self.category);
                EndpointDefaulted {
                    task_id: self.id.as_str(),
                    side: "source",
                    new_type: &source.source_type().to_string(),
                    reason: &e.to_string(),
                }
                .log();
                source
            }
        };
        let destination = match Destination::deserialize(&self.destination) {
            Ok(destination) => destination,
            Err(e) => {
                let destination = default_destination(self.category);
                EndpointDefaulted {
                    task_id: self.id.as_str(),
                    side: "destination",
                    new_type: &destination.destination_type().to_string(),
                    reason: &e.to_string(),
                }
                .log();
                destination
            }
        };
        Task {
            id: self.id,
            name: self.name,
            category: self.category,
            source,
            destination,
            rules,
            schedule: self.schedule,
        }
    }
}

fn decode_rules(task_id: &TaskId, text: &str) -> RuleSet {
    if text.trim().is_empty() {
        return RuleSet::new();
    }
    match serde_json::from_str(text) {
        Ok(rules) => rules,
        Err(e) => {
            RulesDiscarded {
                task_id: task_id.as_str(),
                error: &e,
            }
            .log();
            RuleSet::new()
        }
    }
}
