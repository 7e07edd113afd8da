//! Integer pixel geometry used by the layout engine.
//!
//! Coordinates are signed so that a grid narrower than its margins yields
//! negative widths instead of wrapping around.

/// A point in 2D pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D pixel space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(20, 30, 100, 50);
        assert_eq!(rect.left(), 20);
        assert_eq!(rect.top(), 30);
        assert_eq!(rect.right(), 120);
        assert_eq!(rect.bottom(), 80);
        assert!(rect.contains(Point::new(20, 30)));
        assert!(!rect.contains(Point::new(120, 30)));
    }

    #[test]
    fn test_negative_width_is_empty() {
        let rect = Rect::new(0, 0, -5, 10);
        assert!(rect.is_empty());
        assert!(Rect::ZERO.is_empty());
    }
}
