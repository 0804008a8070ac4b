//! Weighted grid layout for overlay panels.
//!
//! Items are placed on a grid of columns and rows. Each item names the cells
//! it covers and how strongly it claims space along each axis; the engine
//! turns those claims into pixel sizes and positions.
//!
//! # Architecture
//!
//! 1. **Cells and grid**: proportional sizing of columns and rows plus
//!    minimum-size redistribution between them
//! 2. **Constraints**: per-item grid position, span, weights and insets
//! 3. **Engine**: merges item weights, enforces item minimums and places items
//! 4. **Panel**: keeps items and constraints and relays out on change
//!
//! # Example
//!
//! ```
//! use overlay_layout::{Constraint, OverlayBox, OverlayPanel};
//!
//! let mut panel = OverlayPanel::with_size(200, 100);
//! let left = panel.add_constrained(OverlayBox::default(), &Constraint::at(0, 0).with_resizing(true));
//! let right = panel.add_constrained(OverlayBox::default(), &Constraint::at(1, 0).with_resizing(true));
//!
//! assert_eq!(panel.get(left).map(|b| b.size().x), Some(100));
//! assert_eq!(panel.get(right).map(|b| b.location().x), Some(100));
//! ```

mod cell;
mod constraint;
mod engine;
mod grid;
mod item;
mod panel;

pub use cell::{Cell, GridCell};
pub use constraint::{Constraint, ConstraintValue};
pub use engine::{GridBagLayout, Placement};
pub use grid::{redistribute, CellWeights, Grid, Redistribution, WeightMatrix};
pub use item::{Item, OverlayBox};
pub use panel::{ItemId, OverlayPanel};

pub use overlay_core::{Axis, AttributeValue, CellAttribute, ConstraintKey, Insets, LayoutError, Rect};
