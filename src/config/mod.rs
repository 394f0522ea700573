// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod settings;

pub mod consts;

pub use settings::{
    load_settings, CanvasSettings, EditorSettings, NotificationSettings, SchemaSettings,
    StoreSettings,
};
