//! Core types and errors for the overlay toolkit.
//!
//! This crate provides the foundational types shared by the layout engine and
//! its host containers:
//! - Axis-aware geometry (`Axis`, `Insets`, `Rect`)
//! - Closed attribute key sets for cells and constraints
//! - Error types

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;
