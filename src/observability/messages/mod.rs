// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `reconcile` - source/destination auto-correction after category changes
//! * `rules` - rule list edits
//! * `graph` - canvas edits: drops, grouping, connections
//! * `schema` - field schema and settings loading
//! * `store` - save and load against the persistence boundary
//!
//! # Usage Pattern
//!
//! ```rust
//! use ingest_designer::observability::messages::store::SaveSucceeded;
//!
//! let msg = SaveSucceeded {
//!     target: "tasks",
//!     record_count: 3,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod graph;
pub mod reconcile;
pub mod rules;
pub mod schema;
pub mod store;

use tracing::Span;

/// A log message that knows its own level and fields.
pub trait StructuredLog {
    /// Emit the message at its level with its fields attached.
    fn log(&self);

    /// A span carrying the same fields, for wrapping the work the message
    /// describes.
    fn span(&self, name: &str) -> Span;
}
