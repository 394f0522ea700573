// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event in the designer has its own message type under
//! [`messages`]. A message is a small struct that implements `Display` for a
//! human-readable line and [`messages::StructuredLog`] to emit that line with
//! typed fields through `tracing`.
//!
//! # Usage
//!
//! ```rust
//! use ingest_designer::observability::messages::StructuredLog;
//! use ingest_designer::observability::messages::graph::DropIgnored;
//!
//! DropIgnored { reason: "payload is not valid JSON" }.log();
//! ```
//!
//! Subscribers are installed by the binary with [`init_tracing`]; the library
//! itself never installs one.

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
