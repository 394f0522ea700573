// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The canonical workflow document.
//!
//! This is the only shape a workflow is persisted in. It carries the
//! structure of the canvas (nodes, containment, connections, configs) and
//! nothing about how it is drawn beyond each node's position.
//!
//! # Example
//! ```json
//! {
//!   "name": "Nightly loads",
//!   "nodes": [
//!     { "id": "g1", "type": "group", "label": "Group", "position": {"x": 160, "y": 160},
//!       "parentNode": null, "width": 300, "height": 200 },
//!     { "id": "n1", "type": "sql_transform", "label": "SQL Transformation",
//!       "position": {"x": 40, "y": 40}, "parentNode": "g1", "extent": "parent",
//!       "config": {"source": {}, "destination": {}} }
//!   ],
//!   "edges": [ { "id": "e1", "source": "n1", "target": "n2", "label": null } ]
//! }
//! ```

use crate::graph::{Extent, GraphEdge, GraphNode, NodeConfig, NodeKind, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    /// Always written, `null` for top-level nodes.
    #[serde(rename = "parentNode", alias = "parentId", default)]
    pub parent_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEdge {
    /// Older documents may omit edge ids; one is minted on load.
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    /// Always written, `null` when unlabelled.
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<SerializedNode>,
    #[serde(default)]
    pub edges: Vec<SerializedEdge>,
}

impl From<&GraphNode> for SerializedNode {
    fn from(node: &GraphNode) -> Self {
        let (config, width, height) = match &node.kind {
            NodeKind::Task { config, .. } => (Some(config.clone()), None, None),
            NodeKind::Group { width, height } => (None, Some(*width), Some(*height)),
        };

        Self {
            id: node.id.to_string(),
            node_type: node.type_name().to_string(),
            label: node.label.clone(),
            position: node.position,
            parent_node: node.parent_id.as_ref().map(ToString::to_string),
            extent: node.extent,
            config,
            width,
            height,
        }
    }
}

impl From<&GraphEdge> for SerializedEdge {
    fn from(edge: &GraphEdge) -> Self {
        Self {
            id: edge.id.to_string(),
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            label: edge.label.clone(),
        }
    }
}

/// Flatten canvas state into a document. The inputs are only read.
pub fn serialize(name: &str, nodes: &[GraphNode], edges: &[GraphEdge]) -> WorkflowDocument {
    WorkflowDocument {
        name: name.to_string(),
        nodes: nodes.iter().map(SerializedNode::from).collect(),
        edges: edges.iter().map(SerializedEdge::from).collect(),
    }
}
