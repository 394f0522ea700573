// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::{Category, RuleKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("Rule kind '{kind}' is not allowed on task '{task_id}' with category '{category}'")]
    KindNotAllowed {
        task_id: String,
        kind: RuleKind,
        category: Category,
    },

    #[error("Task '{0}' not found")]
    TaskNotFound(String),
}
