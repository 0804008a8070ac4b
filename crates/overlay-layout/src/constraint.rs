//! Per-item grid placement constraints.

use std::ops::Range;

use overlay_core::{Axis, ConstraintKey, Insets, LayoutError};

/// Where an item sits on the grid and how it claims space.
///
/// Spans are at least one cell and weights are never negative; the setters
/// clamp out-of-range values instead of failing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Constraint {
    grid_x: usize,
    grid_y: usize,
    grid_width: usize,
    grid_height: usize,
    weight_x: f64,
    weight_y: f64,
    insets: Insets,
    resizing: bool,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            grid_x: 0,
            grid_y: 0,
            grid_width: 1,
            grid_height: 1,
            weight_x: 1.0,
            weight_y: 1.0,
            insets: Insets::ZERO,
            resizing: false,
        }
    }
}

/// A value read or written through a [`ConstraintKey`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintValue {
    Cells(usize),
    Weight(f64),
    Insets(Insets),
    Flag(bool),
}

impl ConstraintValue {
    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintValue::Cells(_) => "cells",
            ConstraintValue::Weight(_) => "weight",
            ConstraintValue::Insets(_) => "insets",
            ConstraintValue::Flag(_) => "flag",
        }
    }
}

impl Constraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the item at a grid cell.
    pub fn at(grid_x: usize, grid_y: usize) -> Self {
        Self::default().with_cell(grid_x, grid_y)
    }

    pub fn with_cell(mut self, grid_x: usize, grid_y: usize) -> Self {
        self.grid_x = grid_x;
        self.grid_y = grid_y;
        self
    }

    pub fn with_span(mut self, grid_width: usize, grid_height: usize) -> Self {
        self.set_grid_width(grid_width);
        self.set_grid_height(grid_height);
        self
    }

    pub fn with_weights(mut self, weight_x: f64, weight_y: f64) -> Self {
        self.set_weight_x(weight_x);
        self.set_weight_y(weight_y);
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_resizing(mut self, resizing: bool) -> Self {
        self.resizing = resizing;
        self
    }

    pub fn grid_x(&self) -> usize {
        self.grid_x
    }

    pub fn grid_y(&self) -> usize {
        self.grid_y
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    pub fn weight_x(&self) -> f64 {
        self.weight_x
    }

    pub fn weight_y(&self) -> f64 {
        self.weight_y
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn resizing(&self) -> bool {
        self.resizing
    }

    pub fn set_grid_x(&mut self, grid_x: usize) {
        self.grid_x = grid_x;
    }

    pub fn set_grid_y(&mut self, grid_y: usize) {
        self.grid_y = grid_y;
    }

    pub fn set_grid_width(&mut self, grid_width: usize) {
        self.grid_width = grid_width.max(1);
    }

    pub fn set_grid_height(&mut self, grid_height: usize) {
        self.grid_height = grid_height.max(1);
    }

    pub fn set_weight_x(&mut self, weight_x: f64) {
        self.weight_x = clamp_weight(weight_x);
    }

    pub fn set_weight_y(&mut self, weight_y: f64) {
        self.weight_y = clamp_weight(weight_y);
    }

    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
    }

    pub fn set_resizing(&mut self, resizing: bool) {
        self.resizing = resizing;
    }

    /// Read a field by key.
    pub fn value(&self, key: ConstraintKey) -> ConstraintValue {
        match key {
            ConstraintKey::GridX => ConstraintValue::Cells(self.grid_x),
            ConstraintKey::GridY => ConstraintValue::Cells(self.grid_y),
            ConstraintKey::GridWidth => ConstraintValue::Cells(self.grid_width),
            ConstraintKey::GridHeight => ConstraintValue::Cells(self.grid_height),
            ConstraintKey::WeightX => ConstraintValue::Weight(self.weight_x),
            ConstraintKey::WeightY => ConstraintValue::Weight(self.weight_y),
            ConstraintKey::Insets => ConstraintValue::Insets(self.insets),
            ConstraintKey::Resizing => ConstraintValue::Flag(self.resizing),
        }
    }

    /// Read a field by key name, e.g. `"GRIDWIDTH"`.
    pub fn value_by_name(&self, name: &str) -> Result<ConstraintValue, LayoutError> {
        Ok(self.value(name.parse()?))
    }

    /// Write a field by key. The value kind must match the key.
    pub fn set_value(&mut self, key: ConstraintKey, value: ConstraintValue) -> Result<(), LayoutError> {
        match (key, value) {
            (ConstraintKey::GridX, ConstraintValue::Cells(v)) => self.set_grid_x(v),
            (ConstraintKey::GridY, ConstraintValue::Cells(v)) => self.set_grid_y(v),
            (ConstraintKey::GridWidth, ConstraintValue::Cells(v)) => self.set_grid_width(v),
            (ConstraintKey::GridHeight, ConstraintValue::Cells(v)) => self.set_grid_height(v),
            (ConstraintKey::WeightX, ConstraintValue::Weight(v)) => self.set_weight_x(v),
            (ConstraintKey::WeightY, ConstraintValue::Weight(v)) => self.set_weight_y(v),
            (ConstraintKey::Insets, ConstraintValue::Insets(v)) => self.set_insets(v),
            (ConstraintKey::Resizing, ConstraintValue::Flag(v)) => self.set_resizing(v),
            (key, _) => {
                return Err(LayoutError::ValueType {
                    key: key.name().to_string(),
                    expected: expected_kind(key),
                })
            }
        }
        Ok(())
    }

    /// Grid coordinate along an axis.
    pub fn origin(&self, axis: Axis) -> Result<usize, LayoutError> {
        self.cells(ConstraintKey::origin(axis))
    }

    /// Span along an axis, in cells.
    pub fn span(&self, axis: Axis) -> Result<usize, LayoutError> {
        self.cells(ConstraintKey::span(axis))
    }

    /// Weight along an axis.
    pub fn weight(&self, axis: Axis) -> Result<f64, LayoutError> {
        let key = ConstraintKey::weight(axis);
        match self.value(key) {
            ConstraintValue::Weight(w) => Ok(w),
            _ => Err(LayoutError::ValueType {
                key: key.name().to_string(),
                expected: expected_kind(key),
            }),
        }
    }

    /// Cells covered along an axis. Always at least one cell long.
    pub fn span_range(&self, axis: Axis) -> Result<Range<usize>, LayoutError> {
        // deserialized values skip the setters
        let span = self.span(axis)?.max(1);
        let start = self.origin(axis)?.min(usize::MAX - span);
        Ok(start..start + span)
    }

    fn cells(&self, key: ConstraintKey) -> Result<usize, LayoutError> {
        match self.value(key) {
            ConstraintValue::Cells(n) => Ok(n),
            _ => Err(LayoutError::ValueType {
                key: key.name().to_string(),
                expected: expected_kind(key),
            }),
        }
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.max(0.0)
    }
}

fn expected_kind(key: ConstraintKey) -> &'static str {
    match key {
        ConstraintKey::GridX
        | ConstraintKey::GridY
        | ConstraintKey::GridWidth
        | ConstraintKey::GridHeight => "cells",
        ConstraintKey::WeightX | ConstraintKey::WeightY => "weight",
        ConstraintKey::Insets => "insets",
        ConstraintKey::Resizing => "flag",
    }
}
