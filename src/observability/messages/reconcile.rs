// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for compatibility reconciliation.
//!
//! Reconciliation never fails; it only corrects. These messages record what
//! it corrected so an operator can see why a source or destination changed.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A task's source was replaced because its type is not allowed for the
/// task's category.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use ingest_designer::observability::messages::reconcile::SourceReset;
///
/// let msg = SourceReset {
///     task_id: "t1",
///     category: "db_to_db",
///     previous_type: "csv",
///     new_type: "mssql",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SourceReset<'a> {
    pub task_id: &'a str,
    pub category: &'a str,
    pub previous_type: &'a str,
    pub new_type: &'a str,
}

impl Display for SourceReset<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' source '{}' is not allowed for {}; reset to '{}'",
            self.task_id, self.previous_type, self.category, self.new_type
        )
    }
}

impl StructuredLog for SourceReset<'_> {
    fn log(&self) {
        tracing::info!(
            task_id = self.task_id,
            category = self.category,
            previous_type = self.previous_type,
            new_type = self.new_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "reconcile",
            span_name = name,
            task_id = self.task_id,
            category = self.category,
        )
    }
}

/// A task's destination was replaced because its type is not allowed for
/// the task's category.
///
/// # Log Level
/// `info!` - Important operational event
pub struct DestinationReset<'a> {
    pub task_id: &'a str,
    pub category: &'a str,
    pub previous_type: &'a str,
    pub new_type: &'a str,
}

impl Display for DestinationReset<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' destination '{}' is not allowed for {}; reset to '{}'",
            self.task_id, self.previous_type, self.category, self.new_type
        )
    }
}

impl StructuredLog for DestinationReset<'_> {
    fn log(&self) {
        tracing::info!(
            task_id = self.task_id,
            category = self.category,
            previous_type = self.previous_type,
            new_type = self.new_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "reconcile",
            span_name = name,
            task_id = self.task_id,
            category = self.category,
        )
    }
}

/// A reconciliation pass over the task table finished.
///
/// # Log Level
/// `debug!` - Runs on every category change
pub struct ReconcileCompleted {
    pub task_count: usize,
    pub corrected_count: usize,
}

impl Display for ReconcileCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reconciled {} tasks, {} corrected",
            self.task_count, self.corrected_count
        )
    }
}

impl StructuredLog for ReconcileCompleted {
    fn log(&self) {
        tracing::debug!(
            task_count = self.task_count,
            corrected_count = self.corrected_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "reconcile",
            span_name = name,
            task_count = self.task_count,
            corrected_count = self.corrected_count,
        )
    }
}
