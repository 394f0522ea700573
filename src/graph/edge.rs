// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::{EdgeId, NodeId};

/// A directed connection between two distinct nodes. Parallel edges are
/// allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
    pub animated: bool,
    /// Selection state, consumed by key-press removal.
    pub selected: bool,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId, label: Option<String>) -> Self {
        Self {
            id: EdgeId::generate(),
            source,
            target,
            label,
            animated: true,
            selected: false,
        }
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}
