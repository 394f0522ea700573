// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::compat;
use crate::errors::RuleError;
use crate::model::category::Category;
use crate::model::endpoint::{Destination, DestinationType, Source, SourceType};
use crate::model::ids::{RuleId, TaskId};
use crate::model::rule::{Rule, RuleKind, RulePatch, RuleSet};
use serde::{Deserialize, Serialize};

/// Optional run schedule of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub enabled: bool,
    pub cron: String,
    pub timezone: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            enabled: false,
            cron: "0 2 * * *".to_string(),
            timezone: "Asia/Singapore".to_string(),
        }
    }
}

/// One configured unit of ingestion work.
///
/// # Example
/// ```json
/// {
///   "id": "7c0e...",
///   "name": "Load orders",
///   "type": "file_to_db",
///   "source": { "type": "csv", "path": "/in/orders.csv", "delimiter": ",", "hasHeader": true, "name": "" },
///   "destination": { "type": "mssql", "db": "dw", "schema": "dbo", "table": "orders", "upsertKey": "order_id" },
///   "rules": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", alias = "taskType")]
    pub category: Category,
    pub source: Source,
    pub destination: Destination,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl Task {
    /// A new task as created by "Add Task": a CSV to SQL Server load.
    pub fn new() -> Self {
        Self {
            id: TaskId::generate(),
            name: "New Task".to_string(),
            category: Category::FileToDb,
            source: Source::default_for(SourceType::Csv),
            destination: Destination::default_for(DestinationType::Mssql),
            rules: RuleSet::new(),
            schedule: Some(Schedule::default()),
        }
    }

    /// Append a rule of `kind`, refusing kinds the category does not allow.
    pub fn add_rule(&mut self, kind: RuleKind) -> Result<RuleId, RuleError> {
        if !self.category.allows_rule(kind) {
            return Err(RuleError::KindNotAllowed {
                task_id: self.id.to_string(),
                kind,
                category: self.category,
            });
        }
        Ok(self.rules.push(kind))
    }

    pub fn update_rule(&mut self, rule_id: &RuleId, patch: &RulePatch) -> bool {
        self.rules.update(rule_id, patch)
    }

    pub fn remove_rule(&mut self, rule_id: &RuleId) -> Option<Rule> {
        self.rules.remove(rule_id)
    }

    /// Rules legal for the current category, in order. Rules left over from
    /// a previous category stay in `rules` but are not listed here.
    pub fn applicable_rules(&self) -> impl Iterator<Item = &Rule> {
        let category = self.category;
        self.rules.iter().filter(move |r| category.allows_rule(r.kind()))
    }

    /// Whether source and destination types are legal for the category.
    pub fn is_compatible(&self) -> bool {
        compat::allowed_sources(self.category).contains(&self.source.source_type())
            && compat::allowed_destinations(self.category)
                .contains(&self.destination.destination_type())
    }

    /// Pick a source type from the allowed list. A different type replaces
    /// the record with that type's defaults; a disallowed type is refused.
    pub fn select_source_type(&mut self, source_type: SourceType) -> bool {
        if !compat::allowed_sources(self.category).contains(&source_type) {
            return false;
        }
        if self.source.source_type() != source_type {
            self.source = Source::default_for(source_type);
        }
        true
    }

    pub fn select_destination_type(&mut self, destination_type: DestinationType) -> bool {
        if !compat::allowed_destinations(self.category).contains(&destination_type) {
            return false;
        }
        if self.destination.destination_type() != destination_type {
            self.destination = Destination::default_for(destination_type);
        }
        true
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_category(category: Category) -> Task {
        let mut task = Task::new();
        task.category = category;
        task
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new();
        assert_eq!(task.name, "New Task");
        assert_eq!(task.category, Category::FileToDb);
        assert_eq!(task.source.source_type(), SourceType::Csv);
        assert_eq!(task.destination.destination_type(), DestinationType::Mssql);
        assert!(task.rules.is_empty());
        assert_eq!(task.schedule, Some(Schedule::default()));
        assert!(task.is_compatible());
    }

    #[test]
    fn test_add_rule_is_gated_by_category() {
        let mut transform = task_with_category(Category::Transform);
        assert!(transform.add_rule(RuleKind::Map).is_ok());
        let err = transform.add_rule(RuleKind::Scd2).unwrap_err();
        assert!(matches!(err, RuleError::KindNotAllowed { kind: RuleKind::Scd2, .. }));
        assert_eq!(transform.rules.len(), 1);

        let mut scd = task_with_category(Category::Scd);
        assert!(scd.add_rule(RuleKind::Scd1).is_ok());
        assert!(scd.add_rule(RuleKind::Filter).is_err());

        let mut plain = task_with_category(Category::DbToDb);
        for kind in RuleKind::all() {
            assert!(plain.add_rule(*kind).is_err());
        }
        assert!(plain.rules.is_empty());
    }

    #[test]
    fn test_applicable_rules_hide_leftovers_without_deleting_them() {
        let mut task = task_with_category(Category::Transform);
        task.add_rule(RuleKind::Map).unwrap();
        task.add_rule(RuleKind::Cast).unwrap();

        task.category = Category::Scd;
        task.add_rule(RuleKind::Scd1).unwrap();

        assert_eq!(task.rules.len(), 3);
        let visible: Vec<RuleKind> = task.applicable_rules().map(Rule::kind).collect();
        assert_eq!(visible, vec![RuleKind::Scd1]);
    }

    #[test]
    fn test_select_source_type() {
        let mut task = Task::new();
        task.source.set_field("path", "/in/a.csv");

        assert!(!task.select_source_type(SourceType::Kafka));
        assert_eq!(task.source.source_type(), SourceType::Csv);

        // Reselecting the same type keeps the fields.
        assert!(task.select_source_type(SourceType::Csv));
        assert_eq!(task.source, {
            let mut s = Source::default_for(SourceType::Csv);
            s.set_field("path", "/in/a.csv");
            s
        });

        assert!(task.select_source_type(SourceType::Txt));
        assert_eq!(task.source, Source::default_for(SourceType::Txt));
    }

    #[test]
    fn test_task_json_uses_type_for_category() {
        let task = task_with_category(Category::SqlTransform);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "sql_transform");
        assert!(json.get("category").is_none());

        let legacy = r#"{
            "id": "t1",
            "name": "legacy",
            "taskType": "db-to-file",
            "source": {"type": "mssql"},
            "destination": {"type": "s3"}
        }"#;
        let parsed: Task = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.category, Category::DbToFile);
        assert!(parsed.rules.is_empty());
        assert!(parsed.schedule.is_none());
    }
}
