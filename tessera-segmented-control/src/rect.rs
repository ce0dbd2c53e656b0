//! Logical point geometry used by the segmented control.
//!
//! All values are logical points (`f32`), with the origin at the top-left
//! corner of the control, x growing to the right and y growing downward.
//!
//! # Key Types
//!
//! - [`Point`] - A 2D position
//! - [`Size`] - A 2D extent
//! - [`Rect`] - An origin plus a size
//! - [`EdgeInsets`] - Fixed cap regions of a stretchable glyph
//! - [`ScaleTransform`] - A uniform scale followed by a translation
//!
//! # Example
//!
//! ```
//! use tessera_segmented_control::rect::{Point, Rect};
//!
//! let rect = Rect::new(2.0, 2.0, 98.5, 28.0);
//! assert_eq!(rect.integral(), Rect::new(2.0, 2.0, 99.0, 28.0));
//! assert!(rect.contains(Point::new(10.0, 10.0)));
//! ```

use std::ops::{Add, Sub};

/// A 2D position in logical points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    /// The x-coordinate.
    pub x: f32,
    /// The y-coordinate.
    pub y: f32,
}

impl Point {
    /// The origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns a copy offset by the given deltas.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point::new(x, y)
    }
}

/// A 2D size in logical points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    /// The width.
    pub width: f32,
    /// The height.
    pub height: f32,
}

impl Size {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<[f32; 2]> for Size {
    fn from([width, height]: [f32; 2]) -> Self {
        Size::new(width, height)
    }
}

/// A rectangle described by its top-left corner and size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner.
    pub x: f32,
    /// The y-coordinate of the top-left corner.
    pub y: f32,
    /// The width of the rectangle.
    pub width: f32,
    /// The height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// A zero rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from an origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Creates a rectangle of `size` placed at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::from_origin_size(Point::ZERO, size)
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The x-coordinate of the right edge.
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// The y-coordinate of the bottom edge.
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// The horizontal centre.
    pub fn mid_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// The vertical centre.
    pub fn mid_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// The centre point.
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Returns a copy of this rectangle moved so its centre lies at `center`.
    pub fn with_center(&self, center: Point) -> Self {
        Self::new(
            center.x - self.width * 0.5,
            center.y - self.height * 0.5,
            self.width,
            self.height,
        )
    }

    /// Returns the smallest rectangle with integral coordinates that contains
    /// this one.
    ///
    /// The origin is floored and the far edges are ceiled, so a rectangle that
    /// straddles a pixel boundary grows rather than shrinks.
    pub fn integral(&self) -> Self {
        let x = self.x.floor();
        let y = self.y.floor();
        Self::new(x, y, self.max_x().ceil() - x, self.max_y().ceil() - y)
    }

    /// Checks if a point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive; the right and bottom edges are
    /// exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }
}

/// Fixed regions at the edges of a stretchable glyph.
///
/// Only the area between the caps is tiled or stretched when the glyph is
/// drawn larger than its natural size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EdgeInsets {
    /// Fixed region at the top.
    pub top: f32,
    /// Fixed region at the left.
    pub left: f32,
    /// Fixed region at the bottom.
    pub bottom: f32,
    /// Fixed region at the right.
    pub right: f32,
}

impl EdgeInsets {
    /// No caps; the whole glyph stretches.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Creates a new set of insets.
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// A uniform scale applied about an element's centre, followed by a
/// translation.
///
/// This covers every transform the control applies: the pressed thumb,
/// pressed items and direction arrows that scale about their item's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    /// Uniform scale factor.
    pub scale: f32,
    /// Translation applied after scaling.
    pub translation: Point,
}

impl ScaleTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Point::ZERO,
    };

    /// A plain scale about the element's own centre.
    pub const fn scale(scale: f32) -> Self {
        Self {
            scale,
            translation: Point::ZERO,
        }
    }

    /// A scale about an anchor point, where `offset` is the element's centre
    /// minus the anchor.
    ///
    /// Points of the element keep their relative position to that anchor, so
    /// an element sitting right of the anchor is pulled towards it as it
    /// shrinks.
    pub fn scale_about(scale: f32, offset: Point) -> Self {
        Self {
            scale,
            translation: Point::new((scale - 1.0) * offset.x, (scale - 1.0) * offset.y),
        }
    }

    /// Whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Applies the transform to a point expressed relative to the element's
    /// centre.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.translation.x,
            point.y * self.scale + self.translation.y,
        )
    }
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
