// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading editor settings or a field schema file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("Failed to parse schema YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Field schema is invalid:\n{}", format_schema_errors(.0))]
    InvalidSchema(Vec<SchemaError>),
}

/// A single problem found while validating a field schema table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Field '{key}' in {category}.{section} is a select with no options")]
    SelectWithoutOptions {
        category: String,
        section: &'static str,
        key: String,
    },

    #[error("Field '{key}' appears more than once in {category}.{section}")]
    DuplicateKey {
        category: String,
        section: &'static str,
        key: String,
    },

    #[error("Category '{category}' is defined more than once (again as '{name}')")]
    DuplicateCategory { category: String, name: String },

    #[error("Field in {category}.{section} has an empty key")]
    EmptyKey {
        category: String,
        section: &'static str,
    },
}

fn format_schema_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
