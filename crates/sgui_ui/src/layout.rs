//! Geometry primitives and dock carving.

use std::fmt;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from its top-left and bottom-right corners.
    #[must_use]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    /// Returns true if `other` lies entirely within this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Clips this rectangle to `bounds`.
    ///
    /// Unlike [`intersection`](Self::intersection) this always returns a
    /// rectangle inside `bounds`: a zero-sized one on its edge when the two
    /// do not overlap.
    #[must_use]
    pub fn clip_to(&self, bounds: &Self) -> Self {
        self.intersection(bounds).unwrap_or_else(|| {
            let x = self.x.clamp(bounds.x, bounds.right().max(bounds.x));
            let y = self.y.clamp(bounds.y, bounds.bottom().max(bounds.y));
            Self::new(x, y, 0.0, 0.0)
        })
    }

    /// Moves the rectangle by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    ///
    /// Width and height never go below zero.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        let dx = amount.min(self.width * 0.5);
        let dy = amount.min(self.height * 0.5);
        Self::new(
            self.x + dx,
            self.y + dy,
            (self.width - dx * 2.0).max(0.0),
            (self.height - dy * 2.0).max(0.0),
        )
    }
}

/// Placement rule consuming space from one edge of the current region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dock {
    /// Consume a fixed width from the left edge.
    Left,
    /// Consume a fixed width from the right edge.
    Right,
    /// Consume a fixed height from the top edge.
    #[default]
    Top,
    /// Consume a fixed height from the bottom edge.
    Bottom,
    /// Consume everything that is left.
    Fill,
}

impl Dock {
    /// Returns true for docks that consume width.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns true for docks that consume height.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Space available to this dock along its axis.
    #[must_use]
    pub fn available(self, region: Rect) -> f32 {
        match self {
            Self::Left | Self::Right => region.width.max(0.0),
            Self::Top | Self::Bottom => region.height.max(0.0),
            Self::Fill => region.width.max(0.0).max(region.height.max(0.0)),
        }
    }
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Fill => "fill",
        };
        f.write_str(name)
    }
}

/// Carves a slot from `region` according to `dock`.
///
/// Returns `(slot, remaining)`. `size` is clamped to the space available,
/// so slots carved from the same region never overlap and never leave it.
/// [`Dock::Fill`] takes the whole region and leaves an empty one behind.
#[must_use]
pub fn carve(region: Rect, dock: Dock, size: f32) -> (Rect, Rect) {
    let size = size.clamp(0.0, dock.available(region));
    let width = region.width.max(0.0);
    let height = region.height.max(0.0);

    match dock {
        Dock::Left => (
            Rect::new(region.x, region.y, size, height),
            Rect::new(region.x + size, region.y, width - size, height),
        ),
        Dock::Right => (
            Rect::new(region.x + width - size, region.y, size, height),
            Rect::new(region.x, region.y, width - size, height),
        ),
        Dock::Top => (
            Rect::new(region.x, region.y, width, size),
            Rect::new(region.x, region.y + size, width, height - size),
        ),
        Dock::Bottom => (
            Rect::new(region.x, region.y + height - size, width, size),
            Rect::new(region.x, region.y, width, height - size),
        ),
        Dock::Fill => (
            Rect::new(region.x, region.y, width, height),
            Rect::new(region.x + width, region.y + height, 0.0, 0.0),
        ),
    }
}
