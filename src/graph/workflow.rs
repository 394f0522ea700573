// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The workflow canvas: task and group nodes, containment, and connections.
//!
//! Nodes are kept parents-first, so every group precedes the nodes it
//! contains. Each node is either *free* (no parent) or *grouped*; `group`,
//! `attach` and `ungroup` move it between the two states. Positions of
//! grouped nodes are relative to their parent, and every transition rewrites
//! the position so the node does not move on screen. The one exception is
//! `group`, which places the node at a fixed offset inside the new group and
//! sizes the group around it.

use crate::config::consts::GROUP_LABEL;
use crate::config::CanvasSettings;
use crate::errors::GraphError;
use crate::graph::dnd::DropPayload;
use crate::graph::edge::GraphEdge;
use crate::graph::node::{Extent, GraphNode, NodeConfig, NodeKind, Position};
use crate::model::{Category, EdgeId, NodeId};
use crate::observability::messages::graph::{
    EdgeSkipped, EdgesRemoved, NodeDropped, NodeGrouped, NodeSkipped, NodeUngrouped,
    SelfLoopRejected,
};
use crate::observability::messages::StructuredLog;
use crate::schema::{build_form, Form, FormValues, SchemaRegistry};
use crate::serialize::{serialize, WorkflowDocument};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowGraph {
    name: String,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    canvas: CanvasSettings,
}

impl WorkflowGraph {
    pub fn new(name: &str, canvas: CanvasSettings) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
            canvas,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    fn index_of(&self, id: &NodeId) -> Result<usize, GraphError> {
        self.nodes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    /// Parent chain of `id`, nearest first. Stops at a missing parent or a
    /// repeated id.
    fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut chain: Vec<NodeId> = Vec::new();
        let mut current = self.node(id).and_then(|n| n.parent_id.clone());

        while let Some(parent) = current {
            if &parent == id || chain.contains(&parent) {
                break;
            }
            current = self.node(&parent).and_then(|n| n.parent_id.clone());
            chain.push(parent);
        }
        chain
    }

    fn has_parent_cycle(&self, id: &NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut current = self.node(id).and_then(|n| n.parent_id.clone());

        while let Some(parent) = current {
            if &parent == id || !visited.insert(parent.clone()) {
                return true;
            }
            current = self.node(&parent).and_then(|n| n.parent_id.clone());
        }
        false
    }

    /// Position of `id` in canvas coordinates.
    pub fn absolute_position(&self, id: &NodeId) -> Option<Position> {
        let node = self.node(id)?;
        Some(
            self.ancestors(id)
                .iter()
                .filter_map(|a| self.node(a))
                .fold(node.position, |pos, ancestor| pos + ancestor.position),
        )
    }

    /// Whether `id` sits somewhere inside `ancestor`.
    pub fn is_descendant(&self, id: &NodeId, ancestor: &NodeId) -> bool {
        self.ancestors(id).contains(ancestor)
    }

    pub fn children(&self, id: &NodeId) -> impl Iterator<Item = &GraphNode> {
        let id = id.clone();
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_ref() == Some(&id))
    }

    /// Place a task node on the canvas.
    pub fn add_task(&mut self, category: Category, label: &str, position: Position) -> NodeId {
        let node = GraphNode::task(category, label, position);
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Handle a module dropped from the sidebar at `client`, with the canvas
    /// origin at `origin`. An unusable payload changes nothing.
    pub fn drop_module(
        &mut self,
        payload: Option<&str>,
        client: Position,
        origin: Position,
    ) -> Option<NodeId> {
        let payload = DropPayload::parse(payload)?;
        let position = client - origin;
        let id = self.add_task(payload.category, &payload.label, position);

        NodeDropped {
            node_id: id.as_str(),
            category: payload.category.wire_name(),
            x: position.x,
            y: position.y,
        }
        .log();

        Some(id)
    }

    /// Wrap a node in a new group.
    ///
    /// The group is created `group_padding` up and left of the node, in the
    /// node's current frame, and takes the node's place in that frame. The
    /// node moves to `(padding, padding)` inside the group.
    pub fn group(&mut self, id: &NodeId) -> Result<NodeId, GraphError> {
        let index = self.index_of(id)?;
        let padding = Position::new(self.canvas.group_padding, self.canvas.group_padding);

        let (parent_id, position) = {
            let node = &self.nodes[index];
            (node.parent_id.clone(), node.position)
        };

        let mut group = GraphNode::group(
            GROUP_LABEL,
            position - padding,
            self.canvas.group_width,
            self.canvas.group_height,
        );
        if parent_id.is_some() {
            group.parent_id = parent_id;
            group.extent = Some(Extent::Parent);
        }
        let group_id = group.id.clone();

        let node = &mut self.nodes[index];
        node.parent_id = Some(group_id.clone());
        node.position = padding;
        node.extent = Some(Extent::Parent);

        self.nodes.insert(index, group);

        NodeGrouped {
            node_id: id.as_str(),
            group_id: group_id.as_str(),
            created_group: true,
        }
        .log();

        Ok(group_id)
    }

    /// Move a node into an existing group without moving it on screen.
    pub fn attach(&mut self, id: &NodeId, group_id: &NodeId) -> Result<(), GraphError> {
        let index = self.index_of(id)?;
        let group_index = self.index_of(group_id)?;

        if id == group_id || self.is_descendant(group_id, id) {
            return Err(GraphError::ContainmentCycle {
                node_id: id.to_string(),
                group_id: group_id.to_string(),
            });
        }
        if !self.nodes[group_index].is_group() {
            return Err(GraphError::NotAGroup(group_id.to_string()));
        }

        let node_abs = self.absolute_position(id).unwrap_or_default();
        let group_abs = self.absolute_position(group_id).unwrap_or_default();

        let node = &mut self.nodes[index];
        node.parent_id = Some(group_id.clone());
        node.position = node_abs - group_abs;
        node.extent = Some(Extent::Parent);

        self.order_parents_first();

        NodeGrouped {
            node_id: id.as_str(),
            group_id: group_id.as_str(),
            created_group: false,
        }
        .log();

        Ok(())
    }

    /// Take a node out of its group. It keeps its on-screen position.
    pub fn ungroup(&mut self, id: &NodeId) -> Result<(), GraphError> {
        let index = self.index_of(id)?;
        let former = self.nodes[index]
            .parent_id
            .clone()
            .ok_or_else(|| GraphError::NotGrouped(id.to_string()))?;
        let absolute = self.absolute_position(id).unwrap_or_default();

        let node = &mut self.nodes[index];
        node.parent_id = None;
        node.position = absolute;
        node.extent = None;

        NodeUngrouped {
            node_id: id.as_str(),
            former_group_id: former.as_str(),
        }
        .log();

        Ok(())
    }

    /// Connect two distinct nodes. Parallel edges are allowed.
    pub fn connect(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        label: Option<String>,
    ) -> Result<EdgeId, GraphError> {
        if source == target {
            SelfLoopRejected {
                node_id: source.as_str(),
            }
            .log();
            return Err(GraphError::SelfLoop(source.to_string()));
        }
        self.index_of(source)?;
        self.index_of(target)?;

        let edge = GraphEdge::new(source.clone(), target.clone(), label);
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    pub fn select_edge(&mut self, id: &EdgeId, selected: bool) -> bool {
        match self.edges.iter_mut().find(|e| &e.id == id) {
            Some(edge) => {
                edge.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Remove the clicked edge. Returns false when no such edge exists.
    pub fn disconnect_by_click(&mut self, id: &EdgeId) -> bool {
        let removed = self.remove_edges("click", |e| &e.id == id);
        removed > 0
    }

    /// Remove every selected edge, as on a Delete/Backspace key press.
    pub fn disconnect_by_key(&mut self) -> usize {
        self.remove_edges("key", |e| e.selected)
    }

    fn remove_edges<F>(&mut self, trigger: &str, predicate: F) -> usize
    where
        F: Fn(&GraphEdge) -> bool,
    {
        let before = self.edges.len();
        self.edges.retain(|e| !predicate(e));
        let removed = before - self.edges.len();

        if removed > 0 {
            EdgesRemoved {
                trigger,
                removed_count: removed,
            }
            .log();
        }
        removed
    }

    /// Delete a node and its edges. Children move to the top level, keeping
    /// their on-screen positions.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<GraphNode, GraphError> {
        self.index_of(id)?;

        let released: Vec<(NodeId, Position)> = self
            .children(id)
            .map(|child| {
                let absolute = self.absolute_position(&child.id).unwrap_or_default();
                (child.id.clone(), absolute)
            })
            .collect();

        for (child_id, absolute) in released {
            if let Some(child) = self.nodes.iter_mut().find(|n| n.id == child_id) {
                child.parent_id = None;
                child.extent = None;
                child.position = absolute;
            }
        }

        let index = self.index_of(id)?;
        let removed = self.nodes.remove(index);
        self.remove_edges("node delete", |e| e.touches(id));
        Ok(removed)
    }

    /// Build the configuration form for a task node.
    pub fn form_for(&self, id: &NodeId, registry: &SchemaRegistry) -> Result<Form, GraphError> {
        let node = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        match &node.kind {
            NodeKind::Task { category, config } => Ok(build_form(
                *category,
                registry.fields_for(*category),
                &node.label,
                &config.source,
                &config.destination,
            )),
            NodeKind::Group { .. } => Err(GraphError::NotATask(id.to_string())),
        }
    }

    /// Apply a submitted form. A blank name keeps the current label; the
    /// config is replaced wholesale. Groups only take the label.
    pub fn configure_node(&mut self, id: &NodeId, values: &FormValues) -> Result<(), GraphError> {
        let index = self.index_of(id)?;
        let node = &mut self.nodes[index];

        let label = values.name.trim();
        if !label.is_empty() {
            node.label = label.to_string();
        }

        if let NodeKind::Task { config, .. } = &mut node.kind {
            *config = NodeConfig {
                source: values.source.clone(),
                destination: values.destination.clone(),
            };
        }
        Ok(())
    }

    pub fn to_document(&self) -> WorkflowDocument {
        serialize(&self.name, &self.nodes, &self.edges)
    }

    /// Rebuild a canvas from a saved document.
    ///
    /// Nodes of unknown type, duplicate ids, and edges that are self-loops
    /// or reference missing nodes are skipped with a warning; a repeated edge
    /// id is replaced by a fresh one. Parent links to missing nodes or to
    /// task nodes, and links that form a cycle, are dropped.
    pub fn from_document(document: &WorkflowDocument, canvas: CanvasSettings) -> Self {
        let mut graph = Self::new(&document.name, canvas);
        let mut seen: HashSet<String> = HashSet::new();

        for stored in &document.nodes {
            if stored.id.trim().is_empty() {
                NodeSkipped {
                    node_id: &stored.id,
                    reason: "missing id",
                }
                .log();
                continue;
            }
            if !seen.insert(stored.id.clone()) {
                NodeSkipped {
                    node_id: &stored.id,
                    reason: "duplicate id",
                }
                .log();
                continue;
            }

            let kind = if stored.node_type == "group" {
                NodeKind::Group {
                    width: stored.width.unwrap_or(canvas.group_width),
                    height: stored.height.unwrap_or(canvas.group_height),
                }
            } else {
                match stored.node_type.parse::<Category>() {
                    Ok(category) => NodeKind::Task {
                        category,
                        config: stored.config.clone().unwrap_or_default(),
                    },
                    Err(e) => {
                        NodeSkipped {
                            node_id: &stored.id,
                            reason: &e,
                        }
                        .log();
                        continue;
                    }
                }
            };

            graph.nodes.push(GraphNode {
                id: NodeId::from(stored.id.as_str()),
                label: stored.label.clone(),
                position: stored.position,
                parent_id: stored
                    .parent_node
                    .as_deref()
                    .filter(|p| !p.trim().is_empty())
                    .map(NodeId::from),
                extent: stored.extent,
                kind,
            });
        }

        for index in 0..graph.nodes.len() {
            let id = graph.nodes[index].id.clone();
            let unusable = match &graph.nodes[index].parent_id {
                Some(parent) => !graph.node(parent).is_some_and(GraphNode::is_group),
                None => false,
            };
            if unusable || graph.has_parent_cycle(&id) {
                let node = &mut graph.nodes[index];
                node.parent_id = None;
                node.extent = None;
            }
        }

        let mut seen_edges: HashSet<&str> = HashSet::new();
        for stored in &document.edges {
            let source = NodeId::from(stored.source.as_str());
            let target = NodeId::from(stored.target.as_str());

            let reason = if source == target {
                Some("connects a node to itself")
            } else if graph.node(&source).is_none() || graph.node(&target).is_none() {
                Some("references a missing node")
            } else {
                None
            };
            if let Some(reason) = reason {
                EdgeSkipped {
                    edge_id: &stored.id,
                    reason,
                }
                .log();
                continue;
            }

            let mut edge = GraphEdge::new(source, target, stored.label.clone());
            if !stored.id.is_empty() && seen_edges.insert(stored.id.as_str()) {
                edge.id = EdgeId::from(stored.id.as_str());
            }
            graph.edges.push(edge);
        }

        graph.order_parents_first();
        graph
    }

    fn order_parents_first(&mut self) {
        let misordered = self.nodes.iter().enumerate().any(|(index, node)| {
            node.parent_id
                .as_ref()
                .and_then(|p| self.nodes.iter().position(|n| &n.id == p))
                .is_some_and(|parent_index| parent_index > index)
        });
        if !misordered {
            return;
        }

        let depths: Vec<(NodeId, usize)> = self
            .nodes
            .iter()
            .map(|n| (n.id.clone(), self.ancestors(&n.id).len()))
            .collect();
        self.nodes.sort_by_key(|n| {
            depths
                .iter()
                .find(|(id, _)| id == &n.id)
                .map(|(_, depth)| *depth)
                .unwrap_or(0)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldValues, SectionKind};

    fn canvas() -> WorkflowGraph {
        WorkflowGraph::new("test", CanvasSettings::default())
    }

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_drop_creates_task_at_canvas_position() {
        let mut graph = canvas();
        let id = graph
            .drop_module(
                Some(r#"{"type":"sql_transform","label":"SQL Transformation"}"#),
                Position::new(150.0, 80.0),
                Position::new(20.0, 20.0),
            )
            .unwrap();

        let node = graph.node(&id).unwrap();
        assert_eq!(node.position, Position::new(130.0, 60.0));
        assert_eq!(node.category(), Some(Category::SqlTransform));
        assert_eq!(node.label, "SQL Transformation");
        assert_eq!(node.config(), Some(&NodeConfig::default()));
        assert!(node.parent_id.is_none());
    }

    #[test]
    fn test_malformed_drop_is_a_no_op() {
        let mut graph = canvas();
        for payload in [None, Some(""), Some("{"), Some(r#"{"type":"unknown"}"#)] {
            assert!(graph
                .drop_module(payload, Position::new(1.0, 1.0), Position::default())
                .is_none());
        }
        assert!(graph.is_empty());
    }

    #[test]
    fn test_group_wraps_node() {
        let mut graph = canvas();
        let node = graph.add_task(Category::DbToDb, "copy", Position::new(200.0, 200.0));

        let group = graph.group(&node).unwrap();

        let group_node = graph.node(&group).unwrap();
        assert!(group_node.is_group());
        assert_eq!(group_node.position, Position::new(160.0, 160.0));
        assert_eq!(
            group_node.kind,
            NodeKind::Group {
                width: 300.0,
                height: 200.0
            }
        );
        assert!(group_node.parent_id.is_none());

        let inner = graph.node(&node).unwrap();
        assert_eq!(inner.parent_id.as_ref(), Some(&group));
        assert_eq!(inner.position, Position::new(40.0, 40.0));
        assert_eq!(inner.extent, Some(Extent::Parent));

        assert_eq!(graph.nodes()[0].id, group);
        assert_eq!(graph.absolute_position(&node), Some(Position::new(200.0, 200.0)));
    }

    #[test]
    fn test_grouping_a_grouped_node_nests_the_new_group() {
        let mut graph = canvas();
        let node = graph.add_task(Category::DbToDb, "copy", Position::new(200.0, 200.0));
        let outer = graph.group(&node).unwrap();
        let inner = graph.group(&node).unwrap();

        let inner_group = graph.node(&inner).unwrap();
        assert_eq!(inner_group.parent_id.as_ref(), Some(&outer));
        assert_eq!(inner_group.position, Position::new(0.0, 0.0));
        assert_eq!(graph.node(&node).unwrap().parent_id.as_ref(), Some(&inner));

        let order: Vec<&NodeId> = graph.nodes().iter().map(|n| &n.id).collect();
        assert_eq!(order, vec![&outer, &inner, &node]);
        assert_eq!(graph.absolute_position(&node), Some(Position::new(200.0, 200.0)));
    }

    #[test]
    fn test_ungroup_preserves_absolute_position() {
        let mut graph = canvas();
        let node = graph.add_task(Category::DbToDb, "copy", Position::new(200.0, 200.0));
        let group = graph.group(&node).unwrap();

        graph.ungroup(&node).unwrap();

        let released = graph.node(&node).unwrap();
        assert!(released.parent_id.is_none());
        assert!(released.extent.is_none());
        assert_eq!(released.position, Position::new(200.0, 200.0));
        assert!(graph.node(&group).is_some());

        assert_eq!(graph.ungroup(&node), Err(GraphError::NotGrouped(node.to_string())));
    }

    #[test]
    fn test_attach_converts_to_group_coordinates() {
        let mut graph = canvas();
        let node = graph.add_task(Category::FileToDb, "load", Position::new(150.0, 130.0));
        let anchor = graph.add_task(Category::DbToDb, "anchor", Position::new(140.0, 140.0));
        let group = graph.group(&anchor).unwrap();

        graph.attach(&node, &group).unwrap();

        let attached = graph.node(&node).unwrap();
        assert_eq!(attached.parent_id.as_ref(), Some(&group));
        assert_eq!(attached.position, Position::new(50.0, 30.0));
        assert_eq!(graph.absolute_position(&node), Some(Position::new(150.0, 130.0)));

        let group_index = graph.nodes().iter().position(|n| n.id == group).unwrap();
        let node_index = graph.nodes().iter().position(|n| n.id == node).unwrap();
        assert!(group_index < node_index);
    }

    #[test]
    fn test_attach_rejections() {
        let mut graph = canvas();
        let task = graph.add_task(Category::FileToDb, "load", Position::new(300.0, 300.0));
        let other = graph.add_task(Category::DbToDb, "copy", Position::new(0.0, 0.0));
        let inner_anchor = graph.add_task(Category::DbToDb, "anchor", Position::new(100.0, 100.0));
        let inner = graph.group(&inner_anchor).unwrap();
        let outer = graph.group(&inner).unwrap();

        assert_eq!(
            graph.attach(&task, &other),
            Err(GraphError::NotAGroup(other.to_string()))
        );
        assert!(matches!(
            graph.attach(&outer, &outer),
            Err(GraphError::ContainmentCycle { .. })
        ));
        assert!(matches!(
            graph.attach(&outer, &inner),
            Err(GraphError::ContainmentCycle { .. })
        ));
        assert_eq!(
            graph.attach(&task, &NodeId::from("missing")),
            Err(GraphError::NodeNotFound("missing".to_string()))
        );
        assert!(graph.node(&task).unwrap().parent_id.is_none());
    }

    #[test]
    fn test_connect() {
        let mut graph = canvas();
        let a = graph.add_task(Category::FileToDb, "a", Position::default());
        let b = graph.add_task(Category::DbToDb, "b", Position::default());

        assert_eq!(graph.connect(&a, &a, None), Err(GraphError::SelfLoop(a.to_string())));
        assert!(graph.edges().is_empty());

        let first = graph.connect(&a, &b, None).unwrap();
        assert_eq!(graph.edges().len(), 1);
        let edge = graph.edge(&first).unwrap();
        assert!(edge.animated);
        assert_eq!((&edge.source, &edge.target), (&a, &b));
        assert!(edge.label.is_none());

        let second = graph.connect(&a, &b, Some("again".to_string())).unwrap();
        assert_ne!(first, second);
        assert_eq!(graph.edges().len(), 2);

        assert!(graph.connect(&a, &NodeId::from("ghost"), None).is_err());
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_disconnect_by_click_and_key() {
        let mut graph = canvas();
        let a = graph.add_task(Category::FileToDb, "a", Position::default());
        let b = graph.add_task(Category::DbToDb, "b", Position::default());
        let e1 = graph.connect(&a, &b, None).unwrap();
        let e2 = graph.connect(&b, &a, None).unwrap();
        let e3 = graph.connect(&a, &b, None).unwrap();

        assert!(graph.disconnect_by_click(&e1));
        assert!(!graph.disconnect_by_click(&e1));
        assert_eq!(graph.edges().len(), 2);

        assert_eq!(graph.disconnect_by_key(), 0);
        assert!(graph.select_edge(&e3, true));
        assert_eq!(graph.disconnect_by_key(), 1);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].id, e2);
    }

    #[test]
    fn test_delete_group_releases_children_and_edges() {
        let mut graph = canvas();
        let node = graph.add_task(Category::DbToDb, "copy", Position::new(200.0, 200.0));
        let other = graph.add_task(Category::DbToFile, "export", Position::new(500.0, 0.0));
        let group = graph.group(&node).unwrap();
        graph.connect(&group, &other, None).unwrap();
        let kept = graph.connect(&node, &other, None).unwrap();

        let removed = graph.delete_node(&group).unwrap();
        assert!(removed.is_group());

        let released = graph.node(&node).unwrap();
        assert!(released.parent_id.is_none());
        assert_eq!(released.position, Position::new(200.0, 200.0));
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].id, kept);

        assert!(graph.delete_node(&group).is_err());
    }

    #[test]
    fn test_configure_node_from_form() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mut graph = canvas();
        let id = graph.add_task(Category::SqlTransform, "SQL Transformation", Position::default());

        let mut form = graph.form_for(&id, &registry).unwrap();
        assert_eq!(form.name, "SQL Transformation");
        form.set_value(SectionKind::Source, "sql", "select 1");
        form.set_name("  nightly  ");
        graph.configure_node(&id, &form.values()).unwrap();

        let node = graph.node(&id).unwrap();
        assert_eq!(node.label, "nightly");
        let config = node.config().unwrap();
        assert_eq!(config.source["sql"], "select 1");
        assert_eq!(config.source["conn"], "");
        assert_eq!(config.destination["mode"], "");

        let blank = FormValues {
            name: "   ".to_string(),
            source: values(&[("conn", "dw")]),
            destination: FieldValues::new(),
        };
        graph.configure_node(&id, &blank).unwrap();
        let node = graph.node(&id).unwrap();
        assert_eq!(node.label, "nightly");
        assert_eq!(node.config().unwrap().source, values(&[("conn", "dw")]));
    }

    #[test]
    fn test_form_for_group_is_refused() {
        let registry = SchemaRegistry::default();
        let mut graph = canvas();
        let id = graph.add_task(Category::DbToDb, "copy", Position::default());
        let group = graph.group(&id).unwrap();
        assert_eq!(
            graph.form_for(&group, &registry),
            Err(GraphError::NotATask(group.to_string()))
        );
    }

    #[test]
    fn test_document_round_trip() {
        let mut graph = canvas();
        let a = graph.add_task(Category::FileToDb, "load", Position::new(200.0, 200.0));
        let b = graph.add_task(Category::DbToFile, "export", Position::new(600.0, 100.0));
        graph.group(&a).unwrap();
        graph.connect(&a, &b, Some("then".to_string())).unwrap();
        graph
            .configure_node(
                &b,
                &FormValues {
                    name: "export".to_string(),
                    source: values(&[("table", "orders")]),
                    destination: FieldValues::new(),
                },
            )
            .unwrap();

        let document = graph.to_document();
        let json = serde_json::to_string(&document).unwrap();
        let parsed: WorkflowDocument = serde_json::from_str(&json).unwrap();
        let rebuilt = WorkflowGraph::from_document(&parsed, CanvasSettings::default());

        assert_eq!(rebuilt.to_document(), document);
    }

    #[test]
    fn test_from_document_skips_bad_entries() {
        let document: WorkflowDocument = serde_json::from_str(
            r#"{
                "name": "legacy",
                "nodes": [
                    {"id": "a", "type": "file-to-db", "label": "A", "position": {"x": 1, "y": 2}},
                    {"id": "b", "type": "ftp_to_db", "label": "B", "position": {"x": 0, "y": 0}},
                    {"id": "c", "type": "db_to_db", "label": "C", "position": {"x": 5, "y": 5},
                     "parentNode": "nowhere", "extent": "parent"},
                    {"id": "g1", "type": "group", "position": {"x": 0, "y": 0}, "parentNode": "g2"},
                    {"id": "g2", "type": "group", "position": {"x": 0, "y": 0}, "parentNode": "g1"},
                    {"id": "a", "type": "db_to_db"},
                    {"id": "d", "type": "scd", "label": "D", "position": {"x": 7, "y": 7},
                     "parentNode": "a", "extent": "parent"}
                ],
                "edges": [
                    {"id": "e1", "source": "a", "target": "c"},
                    {"id": "e2", "source": "a", "target": "a"},
                    {"id": "e3", "source": "a", "target": "b"},
                    {"source": "c", "target": "a", "label": "back"},
                    {"id": "e1", "source": "d", "target": "c"}
                ]
            }"#,
        )
        .unwrap();

        let mut graph = WorkflowGraph::from_document(&document, CanvasSettings::default());

        let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&"b"));
        assert_eq!(
            graph.node(&NodeId::from("a")).unwrap().category(),
            Some(Category::FileToDb)
        );

        let c = graph.node(&NodeId::from("c")).unwrap();
        assert!(c.parent_id.is_none());
        assert!(c.extent.is_none());

        let g1 = NodeId::from("g1");
        let g2 = NodeId::from("g2");
        assert!(!graph.has_parent_cycle(&g1));
        assert!(!graph.has_parent_cycle(&g2));
        assert_eq!(
            graph.node(&g1).unwrap().kind,
            NodeKind::Group {
                width: 300.0,
                height: 200.0
            }
        );

        let d = graph.node(&NodeId::from("d")).unwrap();
        assert!(d.parent_id.is_none());
        assert!(d.extent.is_none());
        assert_eq!(d.position, Position::new(7.0, 7.0));

        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.edges()[0].id, EdgeId::from("e1"));
        assert!(!graph.edges()[1].id.as_str().is_empty());
        assert_eq!(graph.edges()[1].label.as_deref(), Some("back"));
        assert_ne!(graph.edges()[2].id, EdgeId::from("e1"));
        assert_eq!(graph.edges()[2].source, NodeId::from("d"));

        assert!(graph.disconnect_by_click(&EdgeId::from("e1")));
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[1].source, NodeId::from("d"));
    }
}
