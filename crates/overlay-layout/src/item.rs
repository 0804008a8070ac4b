//! Items placed by the layout engine.

use glam::IVec2;
use overlay_core::Rect;

/// An item the layout engine can size and position.
///
/// The engine reads the bounds and current size and writes back the final
/// size and location once per layout pass.
pub trait Item {
    fn minimum_width(&self) -> i32;
    fn minimum_height(&self) -> i32;
    fn maximum_width(&self) -> i32;
    fn maximum_height(&self) -> i32;
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_size(&mut self, width: i32, height: i32);
    fn set_location(&mut self, x: i32, y: i32);
}

impl<T: Item + ?Sized> Item for Box<T> {
    fn minimum_width(&self) -> i32 {
        (**self).minimum_width()
    }

    fn minimum_height(&self) -> i32 {
        (**self).minimum_height()
    }

    fn maximum_width(&self) -> i32 {
        (**self).maximum_width()
    }

    fn maximum_height(&self) -> i32 {
        (**self).maximum_height()
    }

    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn set_size(&mut self, width: i32, height: i32) {
        (**self).set_size(width, height)
    }

    fn set_location(&mut self, x: i32, y: i32) {
        (**self).set_location(x, y)
    }
}

/// A plain rectangular item with size bounds.
///
/// Size is kept within `[minimum, maximum]`; when the bounds conflict the
/// minimum wins.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    location: IVec2,
    size: IVec2,
    minimum: IVec2,
    maximum: IVec2,
}

impl Default for OverlayBox {
    fn default() -> Self {
        Self {
            location: IVec2::ZERO,
            size: IVec2::ZERO,
            minimum: IVec2::ZERO,
            maximum: IVec2::splat(i32::MAX),
        }
    }
}

impl OverlayBox {
    /// Create a box with the given size.
    pub fn new(width: i32, height: i32) -> Self {
        let mut item = Self::default();
        item.set_size(width, height);
        item
    }

    /// Set the minimum size.
    pub fn with_minimum_size(mut self, width: i32, height: i32) -> Self {
        self.set_minimum_size(width, height);
        self
    }

    /// Set the maximum size.
    pub fn with_maximum_size(mut self, width: i32, height: i32) -> Self {
        self.set_maximum_size(width, height);
        self
    }

    /// Set the minimum size, growing the current size if needed.
    pub fn set_minimum_size(&mut self, width: i32, height: i32) {
        self.minimum = IVec2::new(width, height);
        self.size = self.size.max(self.minimum);
    }

    /// Set the maximum size, shrinking the current size if needed.
    pub fn set_maximum_size(&mut self, width: i32, height: i32) {
        self.maximum = IVec2::new(width, height);
        self.size = self.size.min(self.maximum);
    }

    pub fn location(&self) -> IVec2 {
        self.location
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_vecs(self.location, self.size)
    }
}

impl Item for OverlayBox {
    fn minimum_width(&self) -> i32 {
        self.minimum.x
    }

    fn minimum_height(&self) -> i32 {
        self.minimum.y
    }

    fn maximum_width(&self) -> i32 {
        self.maximum.x
    }

    fn maximum_height(&self) -> i32 {
        self.maximum.y
    }

    fn width(&self) -> i32 {
        self.size.x
    }

    fn height(&self) -> i32 {
        self.size.y
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.size = IVec2::new(width, height).min(self.maximum).max(self.minimum);
    }

    fn set_location(&mut self, x: i32, y: i32) {
        self.location = IVec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_size_clamps() {
        let mut item = OverlayBox::new(10, 10)
            .with_minimum_size(20, 5)
            .with_maximum_size(100, 40);
        assert_eq!(item.size(), IVec2::new(20, 10));

        item.set_size(500, 1);
        assert_eq!((item.width(), item.height()), (100, 5));
    }

    #[test]
    fn test_minimum_wins_over_maximum() {
        let mut item = OverlayBox::default()
            .with_maximum_size(10, 10)
            .with_minimum_size(30, 0);
        item.set_size(50, 50);
        assert_eq!(item.size(), IVec2::new(30, 10));
    }

    #[test]
    fn test_bounds() {
        let mut item = OverlayBox::new(30, 20);
        item.set_location(5, 6);
        assert_eq!(item.bounds(), Rect::new(5, 6, 30, 20));
    }

    #[test]
    fn test_boxed_item_forwards() {
        let mut item: Box<dyn Item> = Box::new(OverlayBox::new(4, 4).with_minimum_size(8, 2));
        item.set_size(1, 1);
        assert_eq!((item.width(), item.height()), (8, 2));
        assert_eq!(item.maximum_width(), i32::MAX);
    }
}
