// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors at the persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workflow '{0}' not found")]
    WorkflowNotFound(String),

    #[error("Invalid workflow name '{0}'")]
    InvalidName(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
