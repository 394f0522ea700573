// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::{Category, NodeId};
use crate::schema::FieldValues;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Sub};

/// A point on the canvas. Relative to the parent group when the node is
/// nested, otherwise relative to the canvas origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Confinement of a nested node. Only `parent` exists: the node cannot be
/// dragged outside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    Parent,
}

/// Source and destination values captured by the node form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default, deserialize_with = "lenient_values")]
    pub source: FieldValues,
    #[serde(default, deserialize_with = "lenient_values")]
    pub destination: FieldValues,
}

/// Saved configs may carry numbers, booleans or nulls where the form
/// would have produced strings.
fn lenient_values<'de, D>(deserializer: D) -> Result<FieldValues, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Task {
        category: Category,
        config: NodeConfig,
    },
    Group {
        width: f64,
        height: f64,
    },
}

/// A task or group on the canvas.
///
/// `parent_id` records containment only. Deleting a group releases its
/// children rather than deleting them.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub position: Position,
    pub parent_id: Option<NodeId>,
    pub extent: Option<Extent>,
    pub kind: NodeKind,
}

impl GraphNode {
    pub fn task(category: Category, label: &str, position: Position) -> Self {
        Self {
            id: NodeId::generate(),
            label: label.to_string(),
            position,
            parent_id: None,
            extent: None,
            kind: NodeKind::Task {
                category,
                config: NodeConfig::default(),
            },
        }
    }

    pub fn group(label: &str, position: Position, width: f64, height: f64) -> Self {
        Self {
            id: NodeId::generate(),
            label: label.to_string(),
            position,
            parent_id: None,
            extent: None,
            kind: NodeKind::Group { width, height },
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    pub fn category(&self) -> Option<Category> {
        match &self.kind {
            NodeKind::Task { category, .. } => Some(*category),
            NodeKind::Group { .. } => None,
        }
    }

    pub fn config(&self) -> Option<&NodeConfig> {
        match &self.kind {
            NodeKind::Task { config, .. } => Some(config),
            NodeKind::Group { .. } => None,
        }
    }

    /// `"group"` for groups, the category wire name for tasks.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Task { category, .. } => category.wire_name(),
            NodeKind::Group { .. } => "group",
        }
    }
}
