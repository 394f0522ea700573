// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Persisted representations of the workflow canvas and the task table.

mod document;
mod table;

pub use document::{serialize, SerializedEdge, SerializedNode, WorkflowDocument};
pub use table::{raw_records, StoredTask, TaskBatch};
