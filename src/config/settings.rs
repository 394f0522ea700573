// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_LOG_FILTER, DEFAULT_STORE_DIRECTORY, DEFAULT_WORKFLOW_NAME, GROUP_HEIGHT,
    GROUP_PADDING, GROUP_WIDTH, TABLE_NOTIFICATION_TTL_MS, WORKFLOW_NOTIFICATION_TTL_MS,
};
use crate::errors::ConfigError;
use crate::observability::messages::schema::SettingsLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Editor settings.
///
/// Every field has a default, so an empty file (or no file) is valid.
///
/// # Example
/// ```toml
/// workflow_name = "Nightly loads"
/// log_filter = "ingest_designer=debug"
///
/// [canvas]
/// group_padding = 40.0
/// group_width = 300.0
/// group_height = 200.0
///
/// [notifications]
/// table_ttl_ms = 2300
/// workflow_ttl_ms = 5000
///
/// [schemas]
/// path = "configs/module-schemas.yaml"
///
/// [store]
/// directory = "./ingest-data"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub workflow_name: String,
    pub log_filter: String,
    pub canvas: CanvasSettings,
    pub notifications: NotificationSettings,
    pub schemas: SchemaSettings,
    pub store: StoreSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            canvas: CanvasSettings::default(),
            notifications: NotificationSettings::default(),
            schemas: SchemaSettings::default(),
            store: StoreSettings::default(),
        }
    }
}

/// Geometry used when the canvas creates groups.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub group_padding: f64,
    pub group_width: f64,
    pub group_height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            group_padding: GROUP_PADDING,
            group_width: GROUP_WIDTH,
            group_height: GROUP_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub table_ttl_ms: u64,
    pub workflow_ttl_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            table_ttl_ms: TABLE_NOTIFICATION_TTL_MS,
            workflow_ttl_ms: WORKFLOW_NOTIFICATION_TTL_MS,
        }
    }
}

impl NotificationSettings {
    pub fn table_ttl(&self) -> Duration {
        Duration::from_millis(self.table_ttl_ms)
    }

    pub fn workflow_ttl(&self) -> Duration {
        Duration::from_millis(self.workflow_ttl_ms)
    }
}

/// Where field schemas come from. `None` uses the table built into the crate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub directory: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_STORE_DIRECTORY),
        }
    }
}

impl EditorSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Load settings from a TOML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EditorSettings, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = EditorSettings::from_toml_str(&content)?;
    SettingsLoaded {
        origin: &path.display().to_string(),
    }
    .log();
    Ok(settings)
}
