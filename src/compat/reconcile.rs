// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Restores the source/destination compatibility invariant.
//!
//! This is the only automatic mutation in the designer. An incompatible
//! source or destination is not reported as an error; it is replaced by a
//! fresh default record of the first allowed type. Fields belonging to the
//! old type are dropped, since they describe a system the task no longer
//! talks to.
//!
//! The pass is idempotent, and a task that is already compatible comes back
//! as `Cow::Borrowed`, so callers can tell "nothing to do" apart from "rewritten".

use super::table::{allowed_destinations, allowed_sources};
use crate::model::{Destination, DestinationType, Source, SourceType, Task, TaskId};
use crate::observability::messages::reconcile::{
    DestinationReset, ReconcileCompleted, SourceReset,
};
use crate::observability::messages::StructuredLog;
use std::borrow::Cow;

/// Reconcile a single task without touching it.
///
/// Returns `Cow::Borrowed(task)` when both types are already allowed,
/// otherwise an owned copy with the offending record(s) replaced.
pub fn reconcile(task: &Task) -> Cow<'_, Task> {
    let source_fix = source_correction(task);
    let destination_fix = destination_correction(task);

    if source_fix.is_none() && destination_fix.is_none() {
        return Cow::Borrowed(task);
    }

    let mut corrected = task.clone();
    if let Some(source_type) = source_fix {
        corrected.source = Source::default_for(source_type);
    }
    if let Some(destination_type) = destination_fix {
        corrected.destination = Destination::default_for(destination_type);
    }
    Cow::Owned(corrected)
}

fn source_correction(task: &Task) -> Option<SourceType> {
    let allowed = allowed_sources(task.category);
    if allowed.contains(&task.source.source_type()) {
        None
    } else {
        allowed.first().copied()
    }
}

fn destination_correction(task: &Task) -> Option<DestinationType> {
    let allowed = allowed_destinations(task.category);
    if allowed.contains(&task.destination.destination_type()) {
        None
    } else {
        allowed.first().copied()
    }
}

/// What reconciliation changed on one task.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub task_id: TaskId,
    pub source: Option<(SourceType, SourceType)>,
    pub destination: Option<(DestinationType, DestinationType)>,
}

/// Summary of a reconciliation pass over a task list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub corrections: Vec<Correction>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Reconcile every task in place. Tasks that are already compatible are not
/// written to at all.
pub fn reconcile_all(tasks: &mut [Task]) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for task in tasks.iter_mut() {
        let corrected = match reconcile(task) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(corrected) => corrected,
        };

        let category = task.category.to_string();
        let source = if corrected.source != task.source {
            let change = (task.source.source_type(), corrected.source.source_type());
            SourceReset {
                task_id: task.id.as_str(),
                category: &category,
                previous_type: &change.0.to_string(),
                new_type: &change.1.to_string(),
            }
            .log();
            Some(change)
        } else {
            None
        };
        let destination = if corrected.destination != task.destination {
            let change = (
                task.destination.destination_type(),
                corrected.destination.destination_type(),
            );
            DestinationReset {
                task_id: task.id.as_str(),
                category: &category,
                previous_type: &change.0.to_string(),
                new_type: &change.1.to_string(),
            }
            .log();
            Some(change)
        } else {
            None
        };

        report.corrections.push(Correction {
            task_id: task.id.clone(),
            source,
            destination,
        });
        *task = corrected;
    }

    ReconcileCompleted {
        task_count: tasks.len(),
        corrected_count: report.corrections.len(),
    }
    .log();

    report
}
