// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Decoding of the module descriptor carried by a sidebar drag.
//!
//! # Example
//! ```json
//! { "type": "sql_transform", "label": "SQL Transformation" }
//! ```

use crate::model::Category;
use crate::observability::messages::graph::DropIgnored;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    module_type: String,
    #[serde(default)]
    label: Option<String>,
}

/// A module dragged from the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct DropPayload {
    pub category: Category,
    pub label: String,
}

impl DropPayload {
    /// Decode the drag data. Anything unusable yields `None`; the reason is
    /// logged at debug level and otherwise ignored.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = match raw.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                DropIgnored {
                    reason: "empty payload",
                }
                .log();
                return None;
            }
        };

        let payload: RawPayload = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(e) => {
                DropIgnored {
                    reason: &format!("payload is not a module descriptor: {}", e),
                }
                .log();
                return None;
            }
        };

        let category: Category = match payload.module_type.parse() {
            Ok(category) => category,
            Err(e) => {
                DropIgnored { reason: &e }.log();
                return None;
            }
        };

        let label = payload
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| category.label().to_string());

        Some(Self { category, label })
    }
}
