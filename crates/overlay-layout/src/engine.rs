//! Grid bag layout: turns items and their constraints into placements.
//!
//! A pass runs as a fixed pipeline:
//!
//! 1. Derive the grid extents and the per-cell weight matrix. An item spanning
//!    `n` cells contributes `weight / n` to each of them; overlapping items
//!    take the maximum.
//! 2. Size columns and rows in proportion to their weights.
//! 3. Enforce minimum widths, items with the narrowest span first.
//! 4. Enforce minimum heights, items with the shortest span first.
//! 5. Read back the merged cell matrix and place every item centered in the
//!    rectangle its span covers.
//!
//! Steps 3 and 4 must run in this order: the horizontal pass changes which
//! columns have slack before the vertical pass starts. Within a pass, items
//! with equal spans keep their insertion order.

use std::ops::Range;

use overlay_core::{Axis, LayoutError, Rect};
use tracing::{debug, debug_span};

use crate::cell::GridCell;
use crate::constraint::Constraint;
use crate::grid::{Grid, WeightMatrix};
use crate::item::Item;

/// Where one item goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Rectangle covered by the item's span
    pub span: Rect,
    /// `span` shrunk by the item's insets
    pub content: Rect,
    /// Whether the item is resized to `content`
    pub resize: bool,
}

impl Placement {
    /// Write the placement back onto an item.
    ///
    /// The item is resized first (if requested) and then centered in `content`
    /// using its size after the resize, which the item may have clamped.
    pub fn apply<I: Item + ?Sized>(&self, item: &mut I) {
        if self.resize {
            item.set_size(self.content.width, self.content.height);
        }
        let x = self.content.x + self.content.width / 2 - item.width() / 2;
        let y = self.content.y + self.content.height / 2 - item.height() / 2;
        item.set_location(x, y);
    }
}

/// Cell ranges an item covers.
#[derive(Debug, Clone)]
struct Spans {
    columns: Range<usize>,
    rows: Range<usize>,
}

impl Spans {
    fn resolve(constraint: &Constraint) -> Result<Self, LayoutError> {
        Ok(Self {
            columns: constraint.span_range(Axis::Horizontal)?,
            rows: constraint.span_range(Axis::Vertical)?,
        })
    }

    fn along(&self, axis: Axis) -> Range<usize> {
        match axis {
            Axis::Horizontal => self.columns.clone(),
            Axis::Vertical => self.rows.clone(),
        }
    }
}

/// Stateless weighted grid layout engine.
///
/// Every call builds a fresh [`Grid`]; nothing carries over between passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridBagLayout;

impl GridBagLayout {
    pub fn new() -> Self {
        Self
    }

    /// Lay out items in an area of `available_width x available_height`.
    ///
    /// Items are only written to after every placement has been computed, so
    /// an error leaves all of them untouched. An empty area or an empty grid
    /// is a no-op.
    pub fn layout<'a, I, E>(
        &self,
        entries: E,
        available_width: i32,
        available_height: i32,
    ) -> Result<(), LayoutError>
    where
        I: Item + ?Sized + 'a,
        E: IntoIterator<Item = (&'a mut I, &'a Constraint)>,
    {
        let mut entries: Vec<(&'a mut I, &'a Constraint)> = entries.into_iter().collect();

        let placements = {
            let view: Vec<(&I, &Constraint)> = entries
                .iter()
                .map(|(item, constraint)| (&**item, *constraint))
                .collect();
            self.arrange(&view, available_width, available_height)?
        };

        for ((item, _), placement) in entries.iter_mut().zip(&placements) {
            placement.apply(&mut **item);
        }
        Ok(())
    }

    /// Compute a placement for every entry without touching the items.
    ///
    /// Returns an empty list when there is nothing to lay out.
    pub fn arrange<I: Item + ?Sized>(
        &self,
        entries: &[(&I, &Constraint)],
        available_width: i32,
        available_height: i32,
    ) -> Result<Vec<Placement>, LayoutError> {
        let _span = debug_span!(
            "grid_bag_layout",
            items = entries.len(),
            available_width,
            available_height
        )
        .entered();

        if available_width <= 0 || available_height <= 0 {
            debug!("empty layout area, skipping pass");
            return Ok(Vec::new());
        }

        let spans = entries
            .iter()
            .map(|(_, constraint)| Spans::resolve(constraint))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = spans.iter().map(|s| s.columns.end).max().unwrap_or(0);
        let rows = spans.iter().map(|s| s.rows.end).max().unwrap_or(0);
        if columns == 0 || rows == 0 {
            debug!("empty grid, skipping pass");
            return Ok(Vec::new());
        }
        debug!(columns, rows, "grid extents");

        let weights = weight_matrix(entries, &spans, columns, rows)?;
        let mut grid = Grid::new(available_width, available_height);
        grid.calculate_cells(&weights);

        for axis in Axis::BOTH {
            enforce_minimums(&mut grid, axis, entries, &spans)?;
        }

        let cells = grid.cells();
        Ok(entries
            .iter()
            .zip(&spans)
            .map(|((_, constraint), spans)| {
                let span = span_rect(&cells, spans);
                Placement {
                    span,
                    content: span.inset(&constraint.insets()),
                    resize: constraint.resizing(),
                }
            })
            .collect())
    }
}

fn weight_matrix<I: Item + ?Sized>(
    entries: &[(&I, &Constraint)],
    spans: &[Spans],
    columns: usize,
    rows: usize,
) -> Result<WeightMatrix, LayoutError> {
    let mut weights = WeightMatrix::new(columns, rows);
    for ((_, constraint), spans) in entries.iter().zip(spans) {
        let weight_x = constraint.weight(Axis::Horizontal)? / spans.columns.len().max(1) as f64;
        let weight_y = constraint.weight(Axis::Vertical)? / spans.rows.len().max(1) as f64;
        for column in spans.columns.clone() {
            for row in spans.rows.clone() {
                weights.raise(column, row, weight_x, weight_y);
            }
        }
    }
    Ok(weights)
}

/// Run the minimum size requests for one axis, narrowest span first.
fn enforce_minimums<I: Item + ?Sized>(
    grid: &mut Grid,
    axis: Axis,
    entries: &[(&I, &Constraint)],
    spans: &[Spans],
) -> Result<(), LayoutError> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| spans[i].along(axis).len());

    for i in order {
        let item = entries[i].0;
        let minimum = match axis {
            Axis::Horizontal => item.minimum_width(),
            Axis::Vertical => item.minimum_height(),
        };
        grid.ensure_minimum_size(axis, spans[i].along(axis), minimum)?;
    }
    Ok(())
}

/// Rectangle covered by a span, read from the merged `[column][row]` matrix.
fn span_rect(cells: &[Vec<GridCell>], spans: &Spans) -> Rect {
    let first_row = spans.rows.start;
    let first_column = spans.columns.start;

    let mut x = 0;
    let mut width = 0;
    for (i, column) in cells.iter().enumerate() {
        let Some(cell) = column.get(first_row) else {
            continue;
        };
        if spans.columns.contains(&i) {
            width += cell.width;
        } else if i < first_column {
            x += cell.width;
        }
    }

    let mut y = 0;
    let mut height = 0;
    if let Some(column) = cells.get(first_column) {
        for (j, cell) in column.iter().enumerate() {
            if spans.rows.contains(&j) {
                height += cell.height;
            } else if j < first_row {
                y += cell.height;
            }
        }
    }

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::OverlayBox;
    use overlay_core::Insets;
    use proptest::prelude::*;

    fn run(items: &mut [OverlayBox], constraints: &[Constraint], width: i32, height: i32) {
        GridBagLayout::new()
            .layout(items.iter_mut().zip(constraints), width, height)
            .unwrap();
    }

    fn placements(
        items: &[OverlayBox],
        constraints: &[Constraint],
        width: i32,
        height: i32,
    ) -> Vec<Placement> {
        let entries: Vec<(&OverlayBox, &Constraint)> = items.iter().zip(constraints).collect();
        GridBagLayout::new().arrange(&entries, width, height).unwrap()
    }

    #[test]
    fn test_minimum_width_takes_from_neighbour() {
        let mut items = vec![
            OverlayBox::default().with_minimum_size(60, 0),
            OverlayBox::default(),
        ];
        let constraints = vec![
            Constraint::at(0, 0).with_resizing(true),
            Constraint::at(1, 0).with_resizing(true),
        ];
        run(&mut items, &constraints, 101, 50);

        // 50.5 rounds to 51 in both columns; column 0 then needs 9 more
        assert_eq!(items[0].bounds(), Rect::new(0, 0, 60, 50));
        assert_eq!(items[1].bounds(), Rect::new(60, 0, 42, 50));
    }

    #[test]
    fn test_spanning_weight_is_split() {
        let items = vec![OverlayBox::default(), OverlayBox::default()];
        let constraints = vec![
            Constraint::at(0, 0).with_span(2, 1),
            Constraint::at(0, 1),
        ];
        let result = placements(&items, &constraints, 300, 100);

        // column weights are max(0.5, 1) = 1 and 0.5
        assert_eq!(result[0].span, Rect::new(0, 0, 300, 50));
        assert_eq!(result[1].span, Rect::new(0, 50, 200, 50));
    }

    #[test]
    fn test_fixed_size_item_is_centered() {
        let mut items = vec![OverlayBox::default(), OverlayBox::new(20, 10)];
        let constraints = vec![
            Constraint::at(0, 0).with_weights(2.0, 1.0),
            Constraint::at(1, 0),
        ];
        run(&mut items, &constraints, 300, 100);

        assert_eq!(items[1].size(), glam::IVec2::new(20, 10));
        assert_eq!(items[1].location(), glam::IVec2::new(240, 45));
    }

    #[test]
    fn test_insets_shrink_resized_item() {
        let mut items = vec![OverlayBox::default()];
        let constraints = vec![Constraint::new()
            .with_insets(Insets::new(5, 10, 5, 10))
            .with_resizing(true)];
        run(&mut items, &constraints, 200, 100);

        assert_eq!(items[0].bounds(), Rect::new(10, 5, 180, 90));
    }

    #[test]
    fn test_clamped_resize_is_centered() {
        let mut items = vec![OverlayBox::default().with_maximum_size(50, 50)];
        let constraints = vec![Constraint::new().with_resizing(true)];
        run(&mut items, &constraints, 200, 100);

        assert_eq!(items[0].bounds(), Rect::new(75, 25, 50, 50));
    }

    #[test]
    fn test_degenerate_area_is_noop() {
        let mut items = vec![OverlayBox::new(10, 10)];
        items[0].set_location(3, 4);
        let before = items.clone();
        let constraints = vec![Constraint::new().with_resizing(true)];

        run(&mut items, &constraints, 0, 100);
        assert_eq!(items, before);
        run(&mut items, &constraints, 100, 0);
        assert_eq!(items, before);
    }

    #[test]
    fn test_empty_entries() {
        let items: Vec<OverlayBox> = Vec::new();
        assert!(placements(&items, &[], 100, 100).is_empty());
    }

    #[test]
    fn test_zero_weights_give_empty_cells() {
        let items = vec![OverlayBox::default()];
        let constraints = vec![Constraint::new().with_weights(0.0, 0.0)];
        let result = placements(&items, &constraints, 100, 100);
        assert_eq!(result[0].span, Rect::new(0, 0, 0, 0));
    }

    #[test]
    fn test_narrow_spans_are_processed_first() {
        let items = vec![
            OverlayBox::default().with_minimum_size(180, 0),
            OverlayBox::default().with_minimum_size(150, 0),
        ];
        let narrow = Constraint::at(0, 0);
        let wide = Constraint::at(1, 0).with_span(2, 1);

        let forward = placements(&items, &[narrow.clone(), wide.clone()], 300, 100);
        let reversed_items = vec![items[1].clone(), items[0].clone()];
        let reversed = placements(&reversed_items, &[wide, narrow], 300, 100);

        assert_eq!(forward[0], reversed[1]);
        assert_eq!(forward[1], reversed[0]);
        // the wide span takes back the 30 pixels column 0 held before
        assert_eq!(forward[0].span, Rect::new(0, 0, 150, 100));
        assert_eq!(forward[1].span, Rect::new(150, 0, 150, 100));
    }

    #[test]
    fn test_equal_spans_follow_insertion_order() {
        let first = OverlayBox::default().with_minimum_size(150, 0);
        let second = OverlayBox::default().with_minimum_size(150, 0);
        let left = Constraint::at(0, 0);
        let middle = Constraint::at(1, 0);
        let right = Constraint::at(2, 0);

        let items = vec![first.clone(), second.clone(), OverlayBox::default()];
        let result = placements(&items, &[left.clone(), middle.clone(), right.clone()], 300, 50);
        // the later request takes 38 back from the earlier one
        assert_eq!(result[0].span, Rect::new(0, 0, 112, 50));
        assert_eq!(result[1].span, Rect::new(112, 0, 151, 50));
        assert_eq!(result[2].span, Rect::new(263, 0, 37, 50));

        let items = vec![second, first, OverlayBox::default()];
        let result = placements(&items, &[middle, left, right], 300, 50);
        assert_eq!(result[1].span, Rect::new(0, 0, 151, 50));
        assert_eq!(result[0].span, Rect::new(151, 0, 112, 50));
        assert_eq!(result[2].span, Rect::new(263, 0, 37, 50));
    }

    #[test]
    fn test_minimum_width_and_height() {
        let items = vec![
            OverlayBox::default().with_minimum_size(80, 70),
            OverlayBox::default(),
        ];
        let constraints = vec![Constraint::at(0, 0), Constraint::at(1, 1)];
        let result = placements(&items, &constraints, 100, 100);

        assert_eq!(result[0].span, Rect::new(0, 0, 80, 70));
        assert_eq!(result[1].span, Rect::new(80, 70, 20, 30));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_zero_span_from_json_is_laid_out() {
        let constraint: Constraint =
            serde_json::from_str(r#"{"grid_width": 0, "resizing": true}"#).unwrap();
        let mut items = vec![OverlayBox::default()];
        run(&mut items, &[constraint], 100, 100);

        assert_eq!(items[0].bounds(), Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut items = vec![
            OverlayBox::default().with_minimum_size(40, 10),
            OverlayBox::new(15, 15),
            OverlayBox::default(),
        ];
        let constraints = vec![
            Constraint::at(0, 0).with_span(2, 1).with_resizing(true),
            Constraint::at(2, 0).with_weights(0.5, 1.0),
            Constraint::at(0, 1).with_span(3, 1).with_resizing(true),
        ];
        run(&mut items, &constraints, 157, 93);
        let first = items.clone();
        run(&mut items, &constraints, 157, 93);
        assert_eq!(items, first);
    }

    #[test]
    fn test_boxed_items() {
        let mut items: Vec<Box<dyn Item>> = vec![
            Box::new(OverlayBox::default()),
            Box::new(OverlayBox::new(10, 10)),
        ];
        let constraints = vec![Constraint::at(0, 0).with_resizing(true), Constraint::at(1, 0)];
        GridBagLayout::new()
            .layout(items.iter_mut().map(|b| &mut **b).zip(&constraints), 100, 40)
            .unwrap();

        assert_eq!((items[0].width(), items[0].height()), (50, 40));
        assert_eq!((items[1].width(), items[1].height()), (10, 10));
    }

    fn row_of_items(weights: &[f64], minimums: &[i32]) -> (Vec<OverlayBox>, Vec<Constraint>) {
        let items = minimums
            .iter()
            .map(|&min| OverlayBox::default().with_minimum_size(min, 0))
            .collect();
        let constraints = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Constraint::at(i, 0).with_weights(w, 1.0))
            .collect();
        (items, constraints)
    }

    proptest! {
        #[test]
        fn proportional_without_minimums(
            weights in prop::collection::vec(0.1f64..10.0, 1..8),
            available in 1i32..2000,
        ) {
            let (items, constraints) = row_of_items(&weights, &vec![0; weights.len()]);
            let result = placements(&items, &constraints, available, 50);
            let total: f64 = weights.iter().sum();

            for (placement, w) in result.iter().zip(&weights) {
                let exact = available as f64 * w / total;
                prop_assert!((placement.span.width as f64 - exact).abs() <= 1.0);
            }
        }

        #[test]
        fn single_minimum_met_when_feasible(
            weights in prop::collection::vec(0.1f64..10.0, 1..8),
            pick in 0usize..8,
            fraction in 0.0f64..=1.0,
            available in 100i32..2000,
        ) {
            let n = weights.len();
            let mut minimums = vec![0; n];
            // leave room for rounding loss
            minimums[pick % n] = (fraction * (available / 2) as f64).floor() as i32;

            let (items, constraints) = row_of_items(&weights, &minimums);
            let result = placements(&items, &constraints, available, 50);

            for (placement, min) in result.iter().zip(&minimums) {
                prop_assert!(placement.span.width >= *min);
            }
        }

        #[test]
        fn spans_cover_exactly_their_columns(
            spans in prop::collection::vec((0usize..4, 1usize..4), 1..6),
            available in 50i32..1000,
        ) {
            let columns = spans.iter().map(|&(x, w)| x + w).max().unwrap();
            let mut constraints: Vec<Constraint> = spans
                .iter()
                .map(|&(x, w)| Constraint::at(x, 0).with_span(w, 1))
                .collect();
            // zero-weight markers in a second row read back each column
            constraints.extend((0..columns).map(|c| Constraint::at(c, 1).with_weights(0.0, 0.0)));
            let items = vec![OverlayBox::default(); constraints.len()];
            let result = placements(&items, &constraints, available, 40);
            let markers = &result[spans.len()..];

            for (&(x, w), placement) in spans.iter().zip(&result) {
                let width: i32 = markers[x..x + w].iter().map(|p| p.span.width).sum();
                prop_assert_eq!(placement.span.width, width);
                prop_assert_eq!(placement.span.x, markers[x].span.x);
            }
        }

        #[test]
        fn layout_twice_is_stable(
            weights in prop::collection::vec(0.0f64..5.0, 1..6),
            minimums in prop::collection::vec(0i32..200, 6),
            width in 1i32..800,
            height in 1i32..800,
        ) {
            let (mut items, constraints) = row_of_items(&weights, &minimums[..weights.len()]);
            let constraints: Vec<Constraint> =
                constraints.into_iter().map(|c| c.with_resizing(true)).collect();
            run(&mut items, &constraints, width, height);
            let first = items.clone();
            run(&mut items, &constraints, width, height);
            prop_assert_eq!(items, first);
        }
    }
}
