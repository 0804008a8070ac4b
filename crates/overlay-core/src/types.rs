//! Core value types for overlay geometry.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;

use crate::errors::LayoutError;

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Columns, measured by width
    #[default]
    Horizontal,
    /// Rows, measured by height
    Vertical,
}

impl Axis {
    /// Both axes in processing order: columns before rows.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Pick the component of a vector that lies along this axis.
    pub fn component(self, v: IVec2) -> i32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Margins reserved inside an item's allotted rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets { top: 0, left: 0, bottom: 0, right: 0 };

    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Create uniform insets.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal insets.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical insets.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Leading and trailing margins along an axis.
    pub fn along(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }
}

/// Integer pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rect from position and size vectors.
    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, rounded toward zero.
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside the rect (right and bottom edges excluded).
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink the rect by the given insets.
    pub fn inset(&self, insets: &Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.horizontal(),
            self.height - insets.vertical(),
        )
    }

    /// Start coordinate along an axis.
    pub fn origin(&self, axis: Axis) -> i32 {
        axis.component(self.position())
    }

    /// Length along an axis.
    pub fn extent(&self, axis: Axis) -> i32 {
        axis.component(self.size())
    }
}

/// Attribute of a grid cell, addressable without naming the axis.
///
/// Lets the redistribution code run unchanged over columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellAttribute {
    Size,
    MinSize,
    Weight,
}

impl CellAttribute {
    /// Whether the attribute holds a pixel quantity.
    pub fn is_pixel(self) -> bool {
        matches!(self, CellAttribute::Size | CellAttribute::MinSize)
    }

    pub fn name(self) -> &'static str {
        match self {
            CellAttribute::Size => "SIZE",
            CellAttribute::MinSize => "MIN_SIZE",
            CellAttribute::Weight => "WEIGHT",
        }
    }
}

impl fmt::Display for CellAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellAttribute {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SIZE" => Ok(CellAttribute::Size),
            "MIN_SIZE" => Ok(CellAttribute::MinSize),
            "WEIGHT" => Ok(CellAttribute::Weight),
            _ => Err(LayoutError::InvalidAttribute { attribute: s.to_string() }),
        }
    }
}

/// A cell attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Pixels(i32),
    Weight(f64),
}

/// Key into an item's layout constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKey {
    GridX,
    GridY,
    GridWidth,
    GridHeight,
    WeightX,
    WeightY,
    Insets,
    Resizing,
}

impl ConstraintKey {
    pub const ALL: [ConstraintKey; 8] = [
        ConstraintKey::GridX,
        ConstraintKey::GridY,
        ConstraintKey::GridWidth,
        ConstraintKey::GridHeight,
        ConstraintKey::WeightX,
        ConstraintKey::WeightY,
        ConstraintKey::Insets,
        ConstraintKey::Resizing,
    ];

    /// Key of the grid coordinate along an axis.
    pub fn origin(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => ConstraintKey::GridX,
            Axis::Vertical => ConstraintKey::GridY,
        }
    }

    /// Key of the span along an axis.
    pub fn span(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => ConstraintKey::GridWidth,
            Axis::Vertical => ConstraintKey::GridHeight,
        }
    }

    /// Key of the weight along an axis.
    pub fn weight(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => ConstraintKey::WeightX,
            Axis::Vertical => ConstraintKey::WeightY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConstraintKey::GridX => "GRIDX",
            ConstraintKey::GridY => "GRIDY",
            ConstraintKey::GridWidth => "GRIDWIDTH",
            ConstraintKey::GridHeight => "GRIDHEIGHT",
            ConstraintKey::WeightX => "WEIGHTX",
            ConstraintKey::WeightY => "WEIGHTY",
            ConstraintKey::Insets => "INSETS",
            ConstraintKey::Resizing => "RESIZING",
        }
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstraintKey {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ConstraintKey::ALL
            .into_iter()
            .find(|key| key.name() == upper)
            .ok_or_else(|| LayoutError::UnknownKey { key: s.to_string() })
    }
}
