// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod store;

pub use store::{TaskStore, WorkflowStore};
