use tdbu_ui::{Orientation, Px};

use super::{Rail, SliderSize};
use crate::position::{POSITION_MAX, POSITION_MIN};

struct SliderSpecs {
    thickness: Px,
    handle_size: Px,
    handle_hit_extent: Px,
    default_length: Px,
    min_length: Px,
    max_length: Option<Px>,
}

fn get_slider_specs(size: SliderSize) -> SliderSpecs {
    match size {
        SliderSize::Compact => SliderSpecs {
            thickness: Px(42),
            handle_size: Px(4),
            handle_hit_extent: Px(12),
            default_length: Px(96),
            min_length: Px::ZERO,
            max_length: None,
        },
        SliderSize::Large => SliderSpecs {
            thickness: Px(130),
            handle_size: Px(4),
            handle_hit_extent: Px(12),
            default_length: Px(320),
            min_length: Px(200),
            max_length: Some(Px(320)),
        },
    }
}

/// Maps a rail position onto the shared track axis.
///
/// The top rail's coordinate is its position; the bottom rail's position is
/// measured back from the end edge, so its coordinate is `100 - position`.
/// Non-finite positions count as 0.
pub fn coordinate(rail: Rail, position: f32) -> f32 {
    let position = if position.is_finite() {
        position.clamp(POSITION_MIN, POSITION_MAX)
    } else {
        POSITION_MIN
    };
    match rail {
        Rail::Top => position,
        Rail::Bottom => POSITION_MAX - position,
    }
}

/// Filled region between the two handles, in pixels from the track start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FabricSpan {
    /// Start edge.
    pub start: Px,
    /// End edge, never before `start`.
    pub end: Px,
}

impl FabricSpan {
    /// Length of the span.
    pub fn extent(&self) -> Px {
        Px((self.end.0 - self.start.0).max(0))
    }
}

/// Resolved pixel geometry of a track along its primary axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    /// Axis the track is laid out along.
    pub orientation: Orientation,
    /// Track extent on the primary axis.
    pub length: Px,
    /// Track extent on the cross axis.
    pub thickness: Px,
    /// Visible handle bar thickness.
    pub handle_size: Px,
    /// Inset between the track ends and the outermost handle positions.
    pub handle_margin: Px,
    /// Extent of the handle's pointer target on the primary axis.
    pub handle_hit_extent: Px,
}

impl TrackLayout {
    /// Builds the layout for `size`, using the host-measured primary-axis
    /// length when available.
    pub fn new(size: SliderSize, orientation: Orientation, measured_length: Option<Px>) -> Self {
        let specs = get_slider_specs(size);
        let mut length = measured_length
            .filter(|len| len.0 > 0)
            .unwrap_or(specs.default_length);
        length = length.max(specs.min_length);
        if let Some(max) = specs.max_length {
            length = length.min(max);
        }

        Self {
            orientation,
            length,
            thickness: specs.thickness,
            handle_size: specs.handle_size,
            handle_margin: specs.thickness / 8,
            handle_hit_extent: specs.handle_hit_extent,
        }
    }

    fn edge_offset(&self) -> f32 {
        self.handle_margin.to_f32() + self.handle_size.to_f32() / 2.0
    }

    fn travel(&self) -> f32 {
        (self.length.to_f32() - 2.0 * self.handle_margin.to_f32() - self.handle_size.to_f32())
            .max(0.0)
    }

    fn raw_offset(&self, coordinate: f32) -> f32 {
        let progress = (coordinate / POSITION_MAX).clamp(0.0, 1.0);
        self.edge_offset() + progress * self.travel()
    }

    /// Pixel offset of a handle's center for an axis coordinate.
    pub fn handle_offset(&self, coordinate: f32) -> Px {
        Px::round_from_f32(self.raw_offset(coordinate))
    }

    /// Fabric between two handle coordinates.
    ///
    /// The span always runs from the smaller to the larger coordinate, so it
    /// cannot invert even if a transient draft puts the rails out of order.
    pub fn fabric_span(&self, top_coordinate: f32, bottom_coordinate: f32) -> FabricSpan {
        let a = self.raw_offset(top_coordinate);
        let b = self.raw_offset(bottom_coordinate);
        let edge = self.edge_offset();
        let length = self.length.to_f32();
        let start = (a.min(b) - edge).clamp(0.0, length);
        let end = (a.max(b) + edge).clamp(start, length);
        FabricSpan {
            start: Px::round_from_f32(start),
            end: Px::round_from_f32(end),
        }
    }
}
