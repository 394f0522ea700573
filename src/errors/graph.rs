// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors from canvas edits that the caller may want to surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Cannot connect node '{0}' to itself")]
    SelfLoop(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Node '{0}' is not a group")]
    NotAGroup(String),

    #[error("Node '{0}' is a group and has no task form")]
    NotATask(String),

    #[error("Node '{node_id}' cannot be placed inside '{group_id}', which it contains")]
    ContainmentCycle { node_id: String, group_id: String },

    #[error("Node '{0}' is not in a group")]
    NotGrouped(String),
}
