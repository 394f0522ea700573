// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative field schemas per task category and the forms generated
//! from them.

mod form;
mod registry;
mod validation;

pub use form::{
    build_form, merge_values, FieldValues, Form, FormControl, FormSection, FormValues,
    SectionKind, Widget,
};
pub use registry::{FieldDescriptor, InputKind, ModuleSchema, SchemaRegistry};
pub use validation::validate_schemas;
