// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for loading field schemas and editor settings.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A field schema table was loaded.
///
/// # Log Level
/// `info!` - Startup event
///
/// # Example
/// ```
/// use ingest_designer::observability::messages::schema::SchemaLoaded;
///
/// let msg = SchemaLoaded { origin: "builtin", category_count: 6 };
/// tracing::info!("{}", msg);
/// ```
pub struct SchemaLoaded<'a> {
    pub origin: &'a str,
    pub category_count: usize,
}

impl Display for SchemaLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded field schemas for {} categories from {}",
            self.category_count, self.origin
        )
    }
}

impl StructuredLog for SchemaLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            origin = self.origin,
            category_count = self.category_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("schema", span_name = name, origin = self.origin)
    }
}

/// A category has no entry in the loaded schema table; its forms are empty.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct SchemaMissing<'a> {
    pub category: &'a str,
}

impl Display for SchemaMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No field schema for category '{}'; forms will be empty",
            self.category
        )
    }
}

impl StructuredLog for SchemaMissing<'_> {
    fn log(&self) {
        tracing::warn!(category = self.category, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            category = self.category,
        )
    }
}

/// Editor settings were loaded.
///
/// # Log Level
/// `info!` - Startup event
pub struct SettingsLoaded<'a> {
    pub origin: &'a str,
}

impl Display for SettingsLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded editor settings from {}", self.origin)
    }
}

impl StructuredLog for SettingsLoaded<'_> {
    fn log(&self) {
        tracing::info!(origin = self.origin, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("settings", span_name = name, origin = self.origin)
    }
}
