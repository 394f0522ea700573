// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builds the node configuration form from a [`ModuleSchema`].
//!
//! The form is a plain description of controls; drawing it is left to the
//! caller. Stored values are merged over empty-string defaults: every field
//! in the schema gets a value, and stored keys the schema no longer lists
//! are dropped.

use crate::config::consts::{FULL_ROW_SPAN, SELECT_PLACEHOLDER, TEXTAREA_ROWS};
use crate::model::Category;
use crate::schema::registry::{FieldDescriptor, InputKind, ModuleSchema};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field values of one source or destination config, keyed by field key.
pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Source,
    Destination,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Source => "Source",
            SectionKind::Destination => "Destination",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum Widget {
    Text,
    Password,
    Textarea { rows: u8 },
    Select { placeholder: String, options: Vec<String> },
}

impl Widget {
    fn for_field(field: &FieldDescriptor) -> Self {
        match field.input {
            InputKind::Text => Widget::Text,
            InputKind::Password => Widget::Password,
            InputKind::Textarea => Widget::Textarea {
                rows: TEXTAREA_ROWS,
            },
            InputKind::Select => Widget::Select {
                placeholder: SELECT_PLACEHOLDER.to_string(),
                options: field.options.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControl {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub widget: Widget,
    pub value: String,
    /// Grid columns occupied; text areas take the full row.
    pub span: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    pub kind: SectionKind,
    pub title: &'static str,
    pub controls: Vec<FormControl>,
}

/// What a submitted form hands back to the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub source: FieldValues,
    pub destination: FieldValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub category: Category,
    pub name: String,
    pub sections: Vec<FormSection>,
}

/// Project `stored` onto the keys listed in `fields`.
pub fn merge_values(fields: &[FieldDescriptor], stored: &FieldValues) -> FieldValues {
    fields
        .iter()
        .map(|field| {
            let value = stored.get(&field.key).cloned().unwrap_or_default();
            (field.key.clone(), value)
        })
        .collect()
}

/// Build the form for a node of `category`.
///
/// A blank `name` falls back to the category label. Sections whose schema
/// has no fields are left out.
pub fn build_form(
    category: Category,
    schema: &ModuleSchema,
    name: &str,
    source: &FieldValues,
    destination: &FieldValues,
) -> Form {
    let name = if name.trim().is_empty() {
        category.label().to_string()
    } else {
        name.to_string()
    };

    let sections = [
        (SectionKind::Source, &schema.source, source),
        (SectionKind::Destination, &schema.destination, destination),
    ]
    .into_iter()
    .filter(|(_, fields, _)| !fields.is_empty())
    .map(|(kind, fields, stored)| build_section(kind, fields, stored))
    .collect();

    Form {
        category,
        name,
        sections,
    }
}

fn build_section(kind: SectionKind, fields: &[FieldDescriptor], stored: &FieldValues) -> FormSection {
    let mut values = merge_values(fields, stored);
    let controls = fields
        .iter()
        .map(|field| FormControl {
            key: field.key.clone(),
            label: field.label.clone(),
            widget: Widget::for_field(field),
            value: values.remove(&field.key).unwrap_or_default(),
            span: if field.input == InputKind::Textarea {
                FULL_ROW_SPAN
            } else {
                1
            },
        })
        .collect();

    FormSection {
        kind,
        title: kind.title(),
        controls,
    }
}

impl Form {
    pub fn section(&self, kind: SectionKind) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Set the value of one control. Returns false if the form has no such
    /// control; no value is checked against select options.
    pub fn set_value(&mut self, kind: SectionKind, key: &str, value: &str) -> bool {
        let control = self
            .sections
            .iter_mut()
            .filter(|s| s.kind == kind)
            .flat_map(|s| s.controls.iter_mut())
            .find(|c| c.key == key);

        match control {
            Some(control) => {
                control.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Current values, ready to apply to a node.
    pub fn values(&self) -> FormValues {
        let collect = |kind: SectionKind| -> FieldValues {
            self.section(kind)
                .map(|s| {
                    s.controls
                        .iter()
                        .map(|c| (c.key.clone(), c.value.clone()))
                        .collect()
                })
                .unwrap_or_default()
        };

        FormValues {
            name: self.name.clone(),
            source: collect(SectionKind::Source),
            destination: collect(SectionKind::Destination),
        }
    }
}
