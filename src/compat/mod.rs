// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Which source and destination types each task category may use, and the
//! pass that puts a task back inside those bounds after an edit.

mod reconcile;
mod table;

pub use reconcile::{reconcile, reconcile_all, Correction, ReconcileReport};
pub use table::{allowed_destinations, allowed_sources, default_destination, default_source};
