// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the persistence boundary.
//!
//! Saves and loads never stop the editor. Failures are logged here and turned
//! into a notification or an empty result by the session.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A save is about to be handed to the store.
///
/// # Log Level
/// `debug!` - Start of an async operation
pub struct SaveStarted<'a> {
    pub target: &'a str,
    pub record_count: usize,
}

impl Display for SaveStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Saving {} record(s) to {}", self.record_count, self.target)
    }
}

impl StructuredLog for SaveStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            target_name = self.target,
            record_count = self.record_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "store",
            span_name = name,
            target_name = self.target,
            record_count = self.record_count,
        )
    }
}

/// A save reached the store.
///
/// # Log Level
/// `info!` - User action completed
///
/// # Example
/// ```
/// use ingest_designer::observability::messages::store::SaveSucceeded;
///
/// let msg = SaveSucceeded { target: "tasks", record_count: 4 };
/// tracing::info!("{}", msg);
/// ```
pub struct SaveSucceeded<'a> {
    pub target: &'a str,
    pub record_count: usize,
}

impl Display for SaveSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Saved {} record(s) to {}", self.record_count, self.target)
    }
}

impl StructuredLog for SaveSucceeded<'_> {
    fn log(&self) {
        tracing::info!(
            target_name = self.target,
            record_count = self.record_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "store",
            span_name = name,
            target_name = self.target,
            record_count = self.record_count,
        )
    }
}

/// A save did not reach the store. In-memory state is unaffected.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct SaveFailed<'a> {
    pub target: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SaveFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to save {}: {}", self.target, self.error)
    }
}

impl StructuredLog for SaveFailed<'_> {
    fn log(&self) {
        tracing::error!(
            target_name = self.target,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            target_name = self.target,
        )
    }
}

/// A load failed and the editor fell back to an empty result.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct LoadFellBack<'a> {
    pub target: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for LoadFellBack<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not load {} ({}); starting empty",
            self.target, self.error
        )
    }
}

impl StructuredLog for LoadFellBack<'_> {
    fn log(&self) {
        tracing::warn!(
            target_name = self.target,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            target_name = self.target,
        )
    }
}

/// A stored record could not be decoded and was skipped.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct RecordSkipped<'a> {
    pub index: usize,
    pub reason: &'a str,
}

impl Display for RecordSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping stored record #{}: {}", self.index, self.reason)
    }
}

impl StructuredLog for RecordSkipped<'_> {
    fn log(&self) {
        tracing::warn!(index = self.index, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            index = self.index,
        )
    }
}

/// A stored task's rule text could not be decoded; the task loads with no rules.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct RulesDiscarded<'a> {
    pub task_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RulesDiscarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Discarding unreadable rules of task '{}': {}",
            self.task_id, self.error
        )
    }
}

impl StructuredLog for RulesDiscarded<'_> {
    fn log(&self) {
        tracing::warn!(
            task_id = self.task_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            task_id = self.task_id,
        )
    }
}

/// A stored task's source or destination could not be read; it was replaced
/// by the default record for the task's category.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct EndpointDefaulted<'a> {
    pub task_id: &'a str,
    pub side: &'a str,
    pub new_type: &'a str,
    pub reason: &'a str,
}

impl Display for EndpointDefaulted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unreadable {} of task '{}' reset to {}: {}",
            self.side, self.task_id, self.new_type, self.reason
        )
    }
}

impl StructuredLog for EndpointDefaulted<'_> {
    fn log(&self) {
        tracing::warn!(
            task_id = self.task_id,
            side = self.side,
            new_type = self.new_type,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            task_id = self.task_id,
            side = self.side,
        )
    }
}
