//! Physical pixel coordinates for slider geometry.
//!
//! Pointer positions and the bounding rectangle of a slider track are both
//! reported by the host in physical pixels. These types carry those values
//! into the interaction engine, which converts them to fractions of the track.
//!
//! # Key Types
//!
//! - [`Px`] - a single physical pixel value, negative values allowed
//! - [`PxPosition`] - a pointer position (x, y)
//! - [`PxSize`] - a width/height pair
//! - [`PxRect`] - an on-screen rectangle, used for the captured track bounds
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the viewport
//! - X-axis increases to the right
//! - Y-axis increases downward
//! - Pointers dragged outside the viewport may report negative coordinates
//!
//! # Example
//!
//! ```
//! use tdbu_ui::px::{Px, PxPosition, PxRect};
//!
//! let track = PxRect::new(Px::new(10), Px::new(20), Px::new(42), Px::new(96));
//! let pointer = PxPosition::new(Px::new(30), Px::new(68));
//! assert!(track.contains(pointer));
//! ```

use std::ops::{AddAssign, Neg, SubAssign};

/// A physical pixel value.
///
/// Supports negative values so that pointers dragged past the top or left edge
/// of the viewport can still be projected onto a track.
///
/// # Examples
///
/// ```
/// use tdbu_ui::px::Px;
///
/// let a = Px::new(100);
/// let b = Px::new(-50);
/// assert_eq!(a + b, Px::new(50));
/// assert_eq!(a * 2, Px::new(200));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Px` from an i32 value.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns the value, or zero if negative.
    ///
    /// ```
    /// use tdbu_ui::px::Px;
    ///
    /// assert_eq!(Px::new(10).positive(), 10);
    /// assert_eq!(Px::new(-5).positive(), 0);
    /// ```
    pub fn positive(self) -> u32 {
        if self.0 < 0 { 0 } else { self.0 as u32 }
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, saturating at the i32 bounds.
    ///
    /// NaN maps to zero.
    ///
    /// ```
    /// use tdbu_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7).raw(), 42);
    /// assert_eq!(Px::saturating_from_f32(f32::MAX).raw(), i32::MAX);
    /// assert_eq!(Px::saturating_from_f32(f32::NAN).raw(), 0);
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        // `as` saturates and maps NaN to 0.
        Px(value as i32)
    }

    /// Rounds an f32 to the nearest pixel, saturating at the i32 bounds.
    pub fn round_from_f32(value: f32) -> Self {
        Self::saturating_from_f32(value.round())
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }
}

/// A 2D position in physical pixel space.
///
/// # Examples
///
/// ```
/// use tdbu_ui::px::{Px, PxPosition};
///
/// let position = PxPosition::new(Px::new(10), Px::new(20));
/// let moved = position.offset(Px::new(5), Px::new(-3));
/// assert_eq!(moved, PxPosition::new(Px::new(15), Px::new(17)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// The x-coordinate in physical pixels
    pub x: Px,
    /// The y-coordinate in physical pixels
    pub y: Px,
}

impl PxPosition {
    /// The origin (0, 0).
    pub const ZERO: Self = Self { x: Px(0), y: Px(0) };

    /// Creates a new position from x and y coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Offsets the position by the given deltas, saturating on overflow.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxSize {
    /// The width in physical pixels
    pub width: Px,
    /// The height in physical pixels
    pub height: Px,
}

impl PxSize {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size from width and height.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// An on-screen rectangle in physical pixel space.
///
/// The slider captures one of these (the track's bounding box) when a drag
/// starts and projects every later pointer position against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxRect {
    /// The x-coordinate of the top-left corner
    pub x: Px,
    /// The y-coordinate of the top-left corner
    pub y: Px,
    /// The width of the rectangle
    pub width: Px,
    /// The height of the rectangle
    pub height: Px,
}

impl PxRect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new rectangle from its top-left corner and dimensions.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rectangle from a position and size.
    pub fn from_position_size(position: PxPosition, size: PxSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Returns the top-left corner.
    pub fn origin(&self) -> PxPosition {
        PxPosition::new(self.x, self.y)
    }

    /// Returns the dimensions.
    pub fn size(&self) -> PxSize {
        PxSize::new(self.width, self.height)
    }

    /// Returns true when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width.0 <= 0 || self.height.0 <= 0
    }

    /// Checks if a point lies inside the rectangle (right and bottom edges
    /// exclusive).
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x.0 >= self.x.0
            && point.x.0 < self.x.0.saturating_add(self.width.0)
            && point.y.0 >= self.y.0
            && point.y.0 < self.y.0.saturating_add(self.height.0)
    }
}

impl std::ops::Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px::new(-self.0)
    }
}

impl std::ops::Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl std::ops::Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl std::ops::Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

impl From<[i32; 2]> for PxPosition {
    fn from(pos: [i32; 2]) -> Self {
        PxPosition {
            x: Px(pos[0]),
            y: Px(pos[1]),
        }
    }
}

impl From<PxPosition> for [i32; 2] {
    fn from(pos: PxPosition) -> Self {
        [pos.x.0, pos.y.0]
    }
}
