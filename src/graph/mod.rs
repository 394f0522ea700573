// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The workflow canvas model.

mod dnd;
mod edge;
mod node;
mod workflow;

pub use dnd::DropPayload;
pub use edge::GraphEdge;
pub use node::{Extent, GraphNode, NodeConfig, NodeKind, Position};
pub use workflow::WorkflowGraph;
