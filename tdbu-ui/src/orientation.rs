//! Primary-axis selection for one-dimensional controls.

use crate::px::{Px, PxPosition, PxRect};

/// The axis a track is laid out along.
///
/// `Vertical` reads y/height, `Horizontal` reads x/width. The start edge of the
/// track (fraction `0.0`) is the top for vertical tracks and the left for
/// horizontal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// Start coordinate of `rect` on this axis.
    pub fn main_start(self, rect: &PxRect) -> Px {
        match self {
            Orientation::Horizontal => rect.x,
            Orientation::Vertical => rect.y,
        }
    }

    /// Extent of `rect` on this axis.
    pub fn main_length(self, rect: &PxRect) -> Px {
        match self {
            Orientation::Horizontal => rect.width,
            Orientation::Vertical => rect.height,
        }
    }

    /// Component of `point` on this axis.
    pub fn main_axis(self, point: PxPosition) -> Px {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Projects `point` onto the rectangle's primary axis.
    ///
    /// Returns the unclamped fraction of the way along the axis (`0.0` at the
    /// start edge, `1.0` at the end edge), or `None` when the rectangle has no
    /// extent on this axis.
    ///
    /// ```
    /// use tdbu_ui::{Orientation, Px, PxPosition, PxRect};
    ///
    /// let rect = PxRect::new(Px(0), Px(100), Px(40), Px(200));
    /// let point = PxPosition::new(Px(20), Px(150));
    /// assert_eq!(Orientation::Vertical.fraction_along(&rect, point), Some(0.25));
    /// assert_eq!(Orientation::Horizontal.fraction_along(&rect, point), Some(0.5));
    /// ```
    pub fn fraction_along(self, rect: &PxRect, point: PxPosition) -> Option<f32> {
        self.scaled_along(rect, point, 1.0)
    }

    /// Like [`Orientation::fraction_along`], scaled so the end edge maps to
    /// `full_scale`.
    ///
    /// The offset is multiplied before dividing, in `f64`, so whole-pixel
    /// positions that land on a whole value of the scale come out exact.
    ///
    /// ```
    /// use tdbu_ui::{Orientation, Px, PxPosition, PxRect};
    ///
    /// let rect = PxRect::new(Px(0), Px(0), Px(40), Px(100));
    /// let point = PxPosition::new(Px(20), Px(30));
    /// assert_eq!(Orientation::Vertical.scaled_along(&rect, point, 100.0), Some(30.0));
    /// ```
    pub fn scaled_along(self, rect: &PxRect, point: PxPosition, full_scale: f32) -> Option<f32> {
        let length = self.main_length(rect).raw();
        if length <= 0 {
            return None;
        }
        let offset =
            i64::from(self.main_axis(point).raw()) - i64::from(self.main_start(rect).raw());
        Some((offset as f64 * f64::from(full_scale) / f64::from(length)) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_reads_y_axis() {
        let rect = PxRect::new(Px(10), Px(20), Px(42), Px(96));
        let point = PxPosition::new(Px(1000), Px(44));
        assert_eq!(Orientation::Vertical.fraction_along(&rect, point), Some(0.25));
    }

    #[test]
    fn horizontal_reads_x_axis() {
        let rect = PxRect::new(Px(100), Px(0), Px(200), Px(10));
        let point = PxPosition::new(Px(50), Px(-400));
        assert_eq!(
            Orientation::Horizontal.fraction_along(&rect, point),
            Some(-0.25)
        );
    }

    #[test]
    fn whole_pixels_scale_exactly() {
        let rect = PxRect::new(Px(0), Px(0), Px(42), Px(100));
        for y in 0..=100 {
            let point = PxPosition::new(Px(0), Px(y));
            assert_eq!(
                Orientation::Vertical.scaled_along(&rect, point, 100.0),
                Some(y as f32)
            );
        }
        let tall = PxRect::new(Px(0), Px(0), Px(42), Px(1000));
        let half = PxPosition::new(Px(0), Px(425));
        assert_eq!(
            Orientation::Vertical.scaled_along(&tall, half, 100.0),
            Some(42.5)
        );
    }

    #[test]
    fn zero_extent_has_no_fraction() {
        let rect = PxRect::new(Px(0), Px(0), Px(40), Px(0));
        let point = PxPosition::new(Px(5), Px(5));
        assert_eq!(Orientation::Vertical.fraction_along(&rect, point), None);
        assert!(Orientation::Horizontal.fraction_along(&rect, point).is_some());
    }
}
