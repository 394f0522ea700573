// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for rule list edits.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A rule kind was refused because the task's category does not allow it.
///
/// # Log Level
/// `warn!` - The caller offered an action it should not have
///
/// # Example
/// ```
/// use ingest_designer::observability::messages::rules::RuleKindRejected;
///
/// let msg = RuleKindRejected {
///     task_id: "t1",
///     kind: "scd2",
///     category: "transform",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct RuleKindRejected<'a> {
    pub task_id: &'a str,
    pub kind: &'a str,
    pub category: &'a str,
}

impl Display for RuleKindRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rule kind '{}' is not allowed on task '{}' ({})",
            self.kind, self.task_id, self.category
        )
    }
}

impl StructuredLog for RuleKindRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            task_id = self.task_id,
            kind = self.kind,
            category = self.category,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            task_id = self.task_id,
            kind = self.kind,
        )
    }
}

/// An update or removal named a rule id that the task does not have.
///
/// # Log Level
/// `debug!` - Expected no-op
pub struct RuleNotFound<'a> {
    pub task_id: &'a str,
    pub rule_id: &'a str,
}

impl Display for RuleNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' has no rule '{}'", self.task_id, self.rule_id)
    }
}

impl StructuredLog for RuleNotFound<'_> {
    fn log(&self) {
        tracing::debug!(task_id = self.task_id, rule_id = self.rule_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "rules",
            span_name = name,
            task_id = self.task_id,
            rule_id = self.rule_id,
        )
    }
}
