// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Implementations of the persistence traits.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::StoreError;
use crate::serialize::StoredTask;

/// A persisted record that can be matched by id.
trait Keyed {
    fn key(&self) -> Option<&str>;
}

impl Keyed for StoredTask {
    fn key(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

/// Raw records are matched on their `id` field only, so records this build
/// cannot decode are carried through untouched.
impl Keyed for serde_json::Value {
    fn key(&self) -> Option<&str> {
        self.get("id").and_then(serde_json::Value::as_str)
    }
}

/// Merge `incoming` into `existing` by id: matching records are replaced in
/// place, new ones are appended in batch order. Records without an id are
/// never matched.
fn upsert_by_id<R: Keyed>(existing: &mut Vec<R>, incoming: Vec<R>) {
    for record in incoming {
        let slot = match record.key() {
            Some(id) => existing.iter().position(|r| r.key() == Some(id)),
            None => None,
        };
        match slot {
            Some(index) => existing[index] = record,
            None => existing.push(record),
        }
    }
}

/// Workflow names become file names, so they are restricted to a safe set.
fn validate_workflow_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.trim().is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
