//! Weighted grid sizing.
//!
//! The grid keeps one array of [`Cell`]s per axis. Sizing runs in two steps:
//! proportional distribution of the available space by weight, then minimum
//! size enforcement, which moves pixels from cells with slack into the cells
//! an item spans.

use std::ops::Range;

use overlay_core::{Axis, CellAttribute, LayoutError};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cell::{Cell, GridCell};

/// Per-cell weights, before they are folded into columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellWeights {
    pub x: f64,
    pub y: f64,
}

/// `columns x rows` matrix of cell weights, stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    columns: usize,
    rows: usize,
    weights: Vec<CellWeights>,
}

impl WeightMatrix {
    /// Create a zero-weight matrix.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            weights: vec![CellWeights::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of slots along an axis.
    pub fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.columns,
            Axis::Vertical => self.rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<CellWeights> {
        if column < self.columns && row < self.rows {
            Some(self.weights[column * self.rows + row])
        } else {
            None
        }
    }

    /// Raise a cell's weights to at least the given values.
    ///
    /// Out-of-range coordinates are ignored.
    pub fn raise(&mut self, column: usize, row: usize, weight_x: f64, weight_y: f64) {
        if column >= self.columns || row >= self.rows {
            return;
        }
        let cell = &mut self.weights[column * self.rows + row];
        cell.x = cell.x.max(weight_x);
        cell.y = cell.y.max(weight_y);
    }

    /// Largest horizontal weight in a column.
    pub fn column_weight(&self, column: usize) -> f64 {
        (0..self.rows)
            .filter_map(|row| self.get(column, row))
            .fold(0.0, |acc, w| acc.max(w.x))
    }

    /// Largest vertical weight in a row.
    pub fn row_weight(&self, row: usize) -> f64 {
        (0..self.columns)
            .filter_map(|column| self.get(column, row))
            .fold(0.0, |acc, w| acc.max(w.y))
    }

    /// Effective weight of slot `index` along an axis.
    pub fn weight(&self, axis: Axis, index: usize) -> f64 {
        match axis {
            Axis::Horizontal => self.column_weight(index),
            Axis::Vertical => self.row_weight(index),
        }
    }
}

/// Outcome of a minimum size request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redistribution {
    /// The target range is at least the required size
    Satisfied,
    /// No donor had slack left; the target range is `shortfall` pixels short
    Infeasible { shortfall: i32 },
}

impl Redistribution {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Redistribution::Satisfied)
    }
}

/// Column and row cells sized against an available area.
#[derive(Debug, Clone)]
pub struct Grid {
    available_width: i32,
    available_height: i32,
    columns: Vec<Cell>,
    rows: Vec<Cell>,
    total_weight_x: f64,
    total_weight_y: f64,
}

impl Grid {
    /// Create an empty grid for the given available area.
    pub fn new(available_width: i32, available_height: i32) -> Self {
        Self {
            available_width,
            available_height,
            columns: Vec::new(),
            rows: Vec::new(),
            total_weight_x: 0.0,
            total_weight_y: 0.0,
        }
    }

    /// Rebuild the column and row cells from a weight matrix and size them
    /// in proportion to their weights.
    pub fn calculate_cells(&mut self, weights: &WeightMatrix) {
        for axis in Axis::BOTH {
            let mut cells: Vec<Cell> = (0..weights.len(axis))
                .map(|i| Cell::new(axis, i).with_weight(weights.weight(axis, i)))
                .collect();
            let total = distribute_proportionally(&mut cells, self.available(axis));

            match axis {
                Axis::Horizontal => {
                    self.columns = cells;
                    self.total_weight_x = total;
                }
                Axis::Vertical => {
                    self.rows = cells;
                    self.total_weight_y = total;
                }
            }
        }
    }

    /// Grow columns `columns` to a combined width of at least `width`.
    pub fn ensure_minimum_width(
        &mut self,
        columns: Range<usize>,
        width: i32,
    ) -> Result<Redistribution, LayoutError> {
        self.ensure_minimum_size(Axis::Horizontal, columns, width)
    }

    /// Grow rows `rows` to a combined height of at least `height`.
    pub fn ensure_minimum_height(
        &mut self,
        rows: Range<usize>,
        height: i32,
    ) -> Result<Redistribution, LayoutError> {
        self.ensure_minimum_size(Axis::Vertical, rows, height)
    }

    /// Grow the cells in `range` along `axis` to a combined size of at least
    /// `required`, taking space from the cells outside the range.
    pub fn ensure_minimum_size(
        &mut self,
        axis: Axis,
        range: Range<usize>,
        required: i32,
    ) -> Result<Redistribution, LayoutError> {
        let result = redistribute(self.track_mut(axis), range.clone(), required)?;
        if let Redistribution::Infeasible { shortfall } = result {
            debug!(%axis, ?range, required, shortfall, "minimum size not reachable");
        }
        Ok(result)
    }

    /// Merged `[column][row]` matrix of the current sizes.
    pub fn cells(&self) -> Vec<Vec<GridCell>> {
        self.columns
            .iter()
            .map(|column| {
                self.rows
                    .iter()
                    .map(|row| GridCell {
                        column: column.index,
                        row: row.index,
                        width: column.size,
                        height: row.size,
                        weight_x: column.weight,
                        weight_y: row.weight,
                    })
                    .collect()
            })
            .collect()
    }

    /// Cells along an axis.
    pub fn track(&self, axis: Axis) -> &[Cell] {
        match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        }
    }

    fn track_mut(&mut self, axis: Axis) -> &mut [Cell] {
        match axis {
            Axis::Horizontal => &mut self.columns,
            Axis::Vertical => &mut self.rows,
        }
    }

    /// Current sizes along an axis.
    pub fn sizes(&self, axis: Axis) -> Vec<i32> {
        self.track(axis).iter().map(|cell| cell.size).collect()
    }

    /// Sum of the slot weights along an axis.
    pub fn total_weight(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.total_weight_x,
            Axis::Vertical => self.total_weight_y,
        }
    }

    pub fn total_weight_x(&self) -> f64 {
        self.total_weight_x
    }

    pub fn total_weight_y(&self) -> f64 {
        self.total_weight_y
    }

    /// Available pixels along an axis.
    pub fn available(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.available_width,
            Axis::Vertical => self.available_height,
        }
    }
}

/// Size each cell to `round(available * weight / total_weight)` and return the
/// total weight. With zero total weight every cell gets size 0.
///
/// Each cell is rounded on its own, so the sizes may not add up to
/// `available` exactly.
fn distribute_proportionally(cells: &mut [Cell], available: i32) -> f64 {
    let total: f64 = cells.iter().map(|cell| cell.weight).sum();
    for cell in cells.iter_mut() {
        cell.size = if total > 0.0 {
            (available as f64 * cell.weight / total).round() as i32
        } else {
            0
        };
    }
    total
}

/// Grow the cells in `target` to a combined size of at least `required`.
///
/// Each round, cells outside `target` with `size > min_size` donate in
/// proportion to their weight (zero-weight donors give all of their slack).
/// Pixels received by a target cell also raise its minimum by the same
/// amount; space the cell already held stays available to later requests.
/// When every weighted share rounds to zero, the outstanding pixels are taken
/// from donors in index order instead.
pub fn redistribute(
    cells: &mut [Cell],
    target: Range<usize>,
    required: i32,
) -> Result<Redistribution, LayoutError> {
    let end = target.end.min(cells.len());
    let target = target.start.min(end)..end;

    loop {
        let present = cells[target.clone()]
            .iter()
            .map(|cell| cell.pixels(CellAttribute::Size))
            .sum::<Result<i32, LayoutError>>()?;
        if present >= required {
            return Ok(Redistribution::Satisfied);
        }
        let needed = required - present;

        let donors: SmallVec<[usize; 8]> = (0..cells.len())
            .filter(|i| !target.contains(i) && cells[*i].slack() > 0)
            .collect();
        let available_slack: i32 = donors.iter().map(|&i| cells[i].slack()).sum();
        if target.is_empty() || available_slack <= 0 {
            return Ok(Redistribution::Infeasible { shortfall: needed });
        }
        let available_weight: f64 = donors.iter().map(|&i| cells[i].weight).sum();

        let mut moved = 0;
        for &donor in &donors {
            let free = cells[donor].slack();
            let weight = cells[donor].weight;
            let take = if weight <= 0.0 {
                free
            } else {
                let share = (weight / available_weight * needed as f64).round() as i32;
                free.min(share)
            };
            moved += transfer(cells, donor, target.clone(), take)?;
        }

        if moved == 0 {
            let mut outstanding = needed;
            for &donor in &donors {
                if outstanding == 0 {
                    break;
                }
                let take = cells[donor].slack().min(outstanding);
                let given = transfer(cells, donor, target.clone(), take)?;
                outstanding -= given;
                moved += given;
            }
        }

        trace!(?target, required, needed, moved, donors = donors.len(), "redistribution round");
    }
}

/// Move `amount` pixels from `donor` into the target cells, spread as evenly
/// as rounding allows. Returns the number of pixels moved.
fn transfer(
    cells: &mut [Cell],
    donor: usize,
    target: Range<usize>,
    amount: i32,
) -> Result<i32, LayoutError> {
    if amount <= 0 {
        return Ok(0);
    }
    cells[donor].adjust(CellAttribute::Size, -amount)?;

    let end = target.end;
    let mut remaining = amount;
    for index in target {
        let add = (remaining as f64 / (end - index) as f64).round() as i32;
        cells[index].adjust(CellAttribute::Size, add)?;
        cells[index].adjust(CellAttribute::MinSize, add)?;
        remaining -= add;
    }
    Ok(amount)
}
