// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod graph;
mod rules;
mod store;

pub use config::{ConfigError, SchemaError};
pub use graph::GraphError;
pub use rules::RuleError;
pub use store::StoreError;
