// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration model for declarative data ingestion tasks.
//!
//! Tasks pick a category, a source and a destination, and carry an ordered
//! list of transformation or SCD rules. A workflow canvas arranges task
//! nodes into groups and connects them. Nothing here moves data; the crate
//! models, validates and persists the definitions.

pub mod compat;        // category -> allowed endpoints, reconciliation
pub mod config;        // editor settings
pub mod errors;        // error handling
pub mod graph;         // workflow canvas
pub mod model;         // tasks, rules, endpoints
pub mod observability;
pub mod schema;        // field schemas and generated forms
pub mod serialize;     // persisted document shapes
pub mod session;       // owned editor state
pub mod store;         // persistence backends
pub mod traits;        // store abstractions
