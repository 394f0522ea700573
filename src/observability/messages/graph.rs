// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for canvas edits.
//!
//! This module contains message types for logging events related to:
//! * Module drops onto the canvas
//! * Grouping and ungrouping nodes
//! * Connecting and disconnecting nodes

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A drop onto the canvas was ignored because its payload was unusable.
///
/// # Log Level
/// `debug!` - Malformed input is absorbed silently
///
/// # Example
/// ```
/// use ingest_designer::observability::messages::graph::DropIgnored;
///
/// let msg = DropIgnored { reason: "empty payload" };
/// tracing::debug!("{}", msg);
/// ```
pub struct DropIgnored<'a> {
    pub reason: &'a str,
}

impl Display for DropIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Ignoring canvas drop: {}", self.reason)
    }
}

impl StructuredLog for DropIgnored<'_> {
    fn log(&self) {
        tracing::debug!(reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("canvas", span_name = name, reason = self.reason)
    }
}

/// A task node was created from a dropped module.
///
/// # Log Level
/// `info!` - User action
pub struct NodeDropped<'a> {
    pub node_id: &'a str,
    pub category: &'a str,
    pub x: f64,
    pub y: f64,
}

impl Display for NodeDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created {} node '{}' at ({}, {})",
            self.category, self.node_id, self.x, self.y
        )
    }
}

impl StructuredLog for NodeDropped<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            category = self.category,
            x = self.x,
            y = self.y,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "canvas",
            span_name = name,
            node_id = self.node_id,
            category = self.category,
        )
    }
}

/// A node was placed inside a group.
///
/// # Log Level
/// `info!` - User action
pub struct NodeGrouped<'a> {
    pub node_id: &'a str,
    pub group_id: &'a str,
    pub created_group: bool,
}

impl Display for NodeGrouped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.created_group {
            write!(f, "Wrapped node '{}' in new group '{}'", self.node_id, self.group_id)
        } else {
            write!(f, "Moved node '{}' into group '{}'", self.node_id, self.group_id)
        }
    }
}

impl StructuredLog for NodeGrouped<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            group_id = self.group_id,
            created_group = self.created_group,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "canvas",
            span_name = name,
            node_id = self.node_id,
            group_id = self.group_id,
        )
    }
}

/// A node left its group and is top-level again.
///
/// # Log Level
/// `info!` - User action
pub struct NodeUngrouped<'a> {
    pub node_id: &'a str,
    pub former_group_id: &'a str,
}

impl Display for NodeUngrouped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Released node '{}' from group '{}'",
            self.node_id, self.former_group_id
        )
    }
}

impl StructuredLog for NodeUngrouped<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            former_group_id = self.former_group_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "canvas",
            span_name = name,
            node_id = self.node_id,
            former_group_id = self.former_group_id,
        )
    }
}

/// A connection from a node to itself was refused.
///
/// # Log Level
/// `debug!` - Refused user gesture
pub struct SelfLoopRejected<'a> {
    pub node_id: &'a str,
}

impl Display for SelfLoopRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Refusing to connect node '{}' to itself", self.node_id)
    }
}

impl StructuredLog for SelfLoopRejected<'_> {
    fn log(&self) {
        tracing::debug!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("canvas", span_name = name, node_id = self.node_id)
    }
}

/// Edges were removed from the canvas.
///
/// # Log Level
/// `debug!` - User action
pub struct EdgesRemoved<'a> {
    pub trigger: &'a str,
    pub removed_count: usize,
}

impl Display for EdgesRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Removed {} edge(s) via {}", self.removed_count, self.trigger)
    }
}

impl StructuredLog for EdgesRemoved<'_> {
    fn log(&self) {
        tracing::debug!(
            trigger = self.trigger,
            removed_count = self.removed_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("canvas", span_name = name, trigger = self.trigger)
    }
}

/// A node in a loaded document was skipped.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct NodeSkipped<'a> {
    pub node_id: &'a str,
    pub reason: &'a str,
}

impl Display for NodeSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping node '{}': {}", self.node_id, self.reason)
    }
}

impl StructuredLog for NodeSkipped<'_> {
    fn log(&self) {
        tracing::warn!(node_id = self.node_id, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            node_id = self.node_id,
        )
    }
}

/// An edge in a loaded document was skipped.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct EdgeSkipped<'a> {
    pub edge_id: &'a str,
    pub reason: &'a str,
}

impl Display for EdgeSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping edge '{}': {}", self.edge_id, self.reason)
    }
}

impl StructuredLog for EdgeSkipped<'_> {
    fn log(&self) {
        tracing::warn!(edge_id = self.edge_id, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            edge_id = self.edge_id,
        )
    }
}
