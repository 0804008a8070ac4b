//! Error types for the overlay toolkit.

use thiserror::Error;

/// Top-level error type for the overlay toolkit.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors during grid layout.
///
/// Degenerate input and unsatisfiable minimum sizes are not errors; a layout
/// pass handles those locally. These variants indicate a caller passing a key
/// or value the engine does not understand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid cell attribute: {attribute}")]
    InvalidAttribute { attribute: String },

    #[error("Unknown constraint key: {key}")]
    UnknownKey { key: String },

    #[error("Invalid value for constraint key {key}: expected {expected}")]
    ValueType { key: String, expected: &'static str },

    #[error("Unknown item id: {id}")]
    UnknownItem { id: u64 },
}
