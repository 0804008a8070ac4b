//! Host container that keeps items and their constraints and re-runs the
//! grid layout when either the panel or its contents change.

use indexmap::IndexMap;
use overlay_core::LayoutError;
use tracing::warn;

use crate::constraint::Constraint;
use crate::engine::GridBagLayout;
use crate::item::Item;

/// Identifier of an item inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone)]
struct Entry<I> {
    item: I,
    constraint: Option<Constraint>,
}

/// A panel of items laid out on a weighted grid.
///
/// Items keep their insertion order, which is also the tie-break order of the
/// layout engine. Only items added with a constraint take part in the grid.
#[derive(Debug, Clone)]
pub struct OverlayPanel<I> {
    entries: IndexMap<ItemId, Entry<I>>,
    next_id: u64,
    width: i32,
    height: i32,
    constraints_enabled: bool,
    engine: GridBagLayout,
}

impl<I: Item> Default for OverlayPanel<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> OverlayPanel<I> {
    /// Create an empty panel with constraint layout enabled.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_id: 0,
            width: 0,
            height: 0,
            constraints_enabled: true,
            engine: GridBagLayout::new(),
        }
    }

    /// Create an empty panel of the given size.
    pub fn with_size(width: i32, height: i32) -> Self {
        let mut panel = Self::new();
        panel.width = width;
        panel.height = height;
        panel
    }

    fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an item that the grid leaves alone.
    pub fn add(&mut self, item: I) -> ItemId {
        let id = self.next_id();
        self.entries.insert(id, Entry { item, constraint: None });
        id
    }

    /// Add an item placed by `constraint`. The constraint is copied.
    pub fn add_constrained(&mut self, item: I, constraint: &Constraint) -> ItemId {
        let id = self.next_id();
        self.entries.insert(
            id,
            Entry {
                item,
                constraint: Some(constraint.clone()),
            },
        );
        self.refresh();
        id
    }

    /// Remove an item and return it.
    pub fn remove(&mut self, id: ItemId) -> Result<I, LayoutError> {
        let entry = self
            .entries
            .shift_remove(&id)
            .ok_or(LayoutError::UnknownItem { id: id.0 })?;
        if entry.constraint.is_some() {
            self.refresh();
        }
        Ok(entry.item)
    }

    /// Replace an item's constraint. The constraint is copied.
    pub fn set_constraint(&mut self, id: ItemId, constraint: &Constraint) -> Result<(), LayoutError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(LayoutError::UnknownItem { id: id.0 })?;
        entry.constraint = Some(constraint.clone());
        self.refresh();
        Ok(())
    }

    pub fn constraint(&self, id: ItemId) -> Option<&Constraint> {
        self.entries.get(&id).and_then(|entry| entry.constraint.as_ref())
    }

    pub fn get(&self, id: ItemId) -> Option<&I> {
        self.entries.get(&id).map(|entry| &entry.item)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut I> {
        self.entries.get_mut(&id).map(|entry| &mut entry.item)
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &I)> {
        self.entries.iter().map(|(id, entry)| (*id, &entry.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Resize the panel and lay out its items again.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.refresh();
    }

    /// Turn constraint layout on or off. Turning it on lays out immediately.
    pub fn set_constraints_enabled(&mut self, enabled: bool) {
        self.constraints_enabled = enabled;
        if enabled {
            self.refresh();
        }
    }

    pub fn constraints_enabled(&self) -> bool {
        self.constraints_enabled
    }

    /// Run one layout pass over the constrained items.
    ///
    /// On failure no item is changed and the error is returned.
    pub fn relayout(&mut self) -> Result<(), LayoutError> {
        if !self.constraints_enabled {
            return Ok(());
        }
        let engine = self.engine;
        let (width, height) = (self.width, self.height);

        let entries = self.entries.values_mut().filter_map(|entry| {
            let Entry { item, constraint } = entry;
            constraint.as_ref().map(|c| (item, c))
        });
        engine.layout(entries, width, height).map_err(|err| {
            warn!(error = %err, "grid layout failed, keeping previous layout");
            err
        })
    }

    fn refresh(&mut self) {
        // failures are already logged by relayout
        let _ = self.relayout();
    }
}
