/// Offset between a new group's corner and the node it wraps
pub const GROUP_PADDING: f64 = 40.0;
/// Default group width on the canvas
pub const GROUP_WIDTH: f64 = 300.0;
/// Default group height on the canvas
pub const GROUP_HEIGHT: f64 = 200.0;
/// Label given to groups created around a node
pub const GROUP_LABEL: &str = "Group";

/// Lifetime of a notification raised by the task table
pub const TABLE_NOTIFICATION_TTL_MS: u64 = 2_300;
/// Lifetime of a notification raised by the workflow canvas
pub const WORKFLOW_NOTIFICATION_TTL_MS: u64 = 5_000;

/// Name given to a workflow that was never named
pub const DEFAULT_WORKFLOW_NAME: &str = "Untitled Workflow";
/// Filter used when neither RUST_LOG nor the settings provide one
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Directory used by the file store when none is configured
pub const DEFAULT_STORE_DIRECTORY: &str = "./ingest-data";

/// Placeholder option shown first in every select control
pub const SELECT_PLACEHOLDER: &str = "-- select --";
/// Visible rows of a text area control
pub const TEXTAREA_ROWS: u8 = 3;
/// Grid columns taken by a full-width control
pub const FULL_ROW_SPAN: u8 = 2;
