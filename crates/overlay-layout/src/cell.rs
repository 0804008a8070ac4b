//! Grid cell data.
//!
//! A [`Cell`] is one column slot or one row slot of the grid. A [`GridCell`]
//! is the merged view of one column and one row, produced after sizing.

use overlay_core::{AttributeValue, Axis, CellAttribute, LayoutError};

/// One column or row slot of the grid.
///
/// `min_size <= size <= max_size` is the target but is not enforced here; the
/// redistribution pass establishes the lower bound when it can.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Axis this slot belongs to
    pub axis: Axis,
    /// Column or row number
    pub index: usize,
    /// Current pixel size along the axis
    pub size: i32,
    /// Relative claim on available space
    pub weight: f64,
    /// Inclusive lower bound
    pub min_size: i32,
    /// Inclusive upper bound
    pub max_size: i32,
}

impl Cell {
    /// Create an empty slot with no weight and unbounded maximum.
    pub fn new(axis: Axis, index: usize) -> Self {
        Self {
            axis,
            index,
            size: 0,
            weight: 0.0,
            min_size: 0,
            max_size: i32::MAX,
        }
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Set the minimum size.
    pub fn with_min_size(mut self, min_size: i32) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the maximum size.
    pub fn with_max_size(mut self, max_size: i32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Pixels this cell can give up without dropping below its minimum.
    pub fn slack(&self) -> i32 {
        self.size - self.min_size
    }

    /// Read an attribute.
    pub fn get(&self, attribute: CellAttribute) -> AttributeValue {
        match attribute {
            CellAttribute::Size => AttributeValue::Pixels(self.size),
            CellAttribute::MinSize => AttributeValue::Pixels(self.min_size),
            CellAttribute::Weight => AttributeValue::Weight(self.weight),
        }
    }

    /// Read a pixel-valued attribute.
    pub fn pixels(&self, attribute: CellAttribute) -> Result<i32, LayoutError> {
        match self.get(attribute) {
            AttributeValue::Pixels(px) => Ok(px),
            AttributeValue::Weight(_) => Err(invalid(attribute)),
        }
    }

    /// Write an attribute. The value kind must match the attribute.
    pub fn set(&mut self, attribute: CellAttribute, value: AttributeValue) -> Result<(), LayoutError> {
        match (attribute, value) {
            (CellAttribute::Size, AttributeValue::Pixels(px)) => self.size = px,
            (CellAttribute::MinSize, AttributeValue::Pixels(px)) => self.min_size = px,
            (CellAttribute::Weight, AttributeValue::Weight(w)) => self.weight = w,
            _ => return Err(invalid(attribute)),
        }
        Ok(())
    }

    /// Add `delta` pixels to a pixel-valued attribute, returning the new value.
    pub fn adjust(&mut self, attribute: CellAttribute, delta: i32) -> Result<i32, LayoutError> {
        let value = self.pixels(attribute)? + delta;
        self.set(attribute, AttributeValue::Pixels(value))?;
        Ok(value)
    }
}

fn invalid(attribute: CellAttribute) -> LayoutError {
    LayoutError::InvalidAttribute {
        attribute: attribute.name().to_string(),
    }
}

/// Merged column x row cell of a sized grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
    /// Width of the column
    pub width: i32,
    /// Height of the row
    pub height: i32,
    pub weight_x: f64,
    pub weight_y: f64,
}
