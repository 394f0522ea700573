// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural checks for a field schema table.
//!
//! All sections are checked and every problem is collected, so an operator
//! editing an override file sees the full list at once.

use crate::errors::SchemaError;
use crate::schema::registry::{FieldDescriptor, InputKind, ModuleSchema};
use std::collections::{BTreeMap, HashSet};

pub fn validate_schemas(schemas: &BTreeMap<String, ModuleSchema>) -> Result<(), Vec<SchemaError>> {
    let mut errors = Vec::new();

    for (category, schema) in schemas {
        validate_section(category, "source", &schema.source, &mut errors);
        validate_section(category, "destination", &schema.destination, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_section(
    category: &str,
    section: &'static str,
    fields: &[FieldDescriptor],
    errors: &mut Vec<SchemaError>,
) {
    let mut seen = HashSet::new();

    for field in fields {
        if field.key.trim().is_empty() {
            errors.push(SchemaError::EmptyKey {
                category: category.to_string(),
                section,
            });
            continue;
        }

        if !seen.insert(field.key.as_str()) {
            errors.push(SchemaError::DuplicateKey {
                category: category.to_string(),
                section,
                key: field.key.clone(),
            });
        }

        if field.input == InputKind::Select && field.options.is_empty() {
            errors.push(SchemaError::SelectWithoutOptions {
                category: category.to_string(),
                section,
                key: field.key.clone(),
            });
        }
    }
}
