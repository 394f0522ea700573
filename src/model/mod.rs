// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod category;
mod endpoint;
mod ids;
mod rule;
mod table;
mod task;

pub use category::Category;
pub use endpoint::{
    ApiSource, DatabaseDestination, DatabaseSource, Destination, DestinationType,
    FileDestination, FileSource, ObjectDestination, Source, SourceType, StreamSource,
};
pub use ids::{EdgeId, NodeId, RuleId, TaskId};
pub use rule::{Rule, RuleBody, RuleKind, RulePatch, RuleSet};
pub use table::TaskTable;
pub use task::{Schedule, Task};
