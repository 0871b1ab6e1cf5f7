use tdbu_ui::{KeyCode, KeyEvent, Orientation, PxPosition, PxRect};

use super::{Rail, RailPositions};
use crate::position::{POSITION_MAX, POSITION_MIN};

/// Multiplier applied to the keyboard step while Shift is held.
pub(super) const SHIFT_STEP_MULTIPLIER: f32 = 5.0;

/// Clamps `value` into `[min, max]`, settling on `min` when the range is
/// empty.
pub(super) fn clamp_to_range(value: f32, min: f32, max: f32) -> f32 {
    if max.is_nan() || max < min {
        return min;
    }
    value.clamp(min, max)
}

/// Helper: project a pointer onto the track's primary axis as a 0-100
/// percentage. Returns None when the track has no extent.
pub(super) fn pointer_percent(
    point: PxPosition,
    track: &PxRect,
    orientation: Orientation,
) -> Option<f32> {
    let percent = orientation.scaled_along(track, point, POSITION_MAX)?;
    if !percent.is_finite() {
        return None;
    }
    Some(clamp_to_range(percent, POSITION_MIN, POSITION_MAX))
}

/// The rail whose coordinate is nearest to `percent`. Ties go to the top rail.
pub(super) fn nearest_rail(percent: f32, positions: &RailPositions) -> Rail {
    let dist_top = (percent - positions.coordinate(Rail::Top)).abs();
    let dist_bottom = (percent - positions.coordinate(Rail::Bottom)).abs();
    if dist_top <= dist_bottom {
        Rail::Top
    } else {
        Rail::Bottom
    }
}

/// Largest position `rail` may take given the other rail and the gap.
pub(super) fn rail_limit(rail: Rail, positions: &RailPositions, min_gap: f32) -> f32 {
    POSITION_MAX - positions.position(rail.other()) - min_gap
}

/// Draft value for `rail` when the pointer sits at `percent`.
pub(super) fn drag_target(
    rail: Rail,
    percent: f32,
    positions: &RailPositions,
    min_gap: f32,
) -> f32 {
    let raw = match rail {
        Rail::Top => percent,
        Rail::Bottom => POSITION_MAX - percent,
    };
    clamp_to_range(raw, POSITION_MIN, rail_limit(rail, positions, min_gap))
}

/// Signed step for an arrow key, or None for keys that do not move a rail.
///
/// Up/Left decrease, Down/Right increase.
pub(super) fn key_delta(event: &KeyEvent, step: f32) -> Option<f32> {
    if !event.is_down() {
        return None;
    }
    let step = if event.shift() {
        step * SHIFT_STEP_MULTIPLIER
    } else {
        step
    };
    match event.code {
        KeyCode::ArrowUp | KeyCode::ArrowLeft => Some(-step),
        KeyCode::ArrowDown | KeyCode::ArrowRight => Some(step),
        _ => None,
    }
}

/// Next position for `rail` after a keyboard step of `delta`.
///
/// Increasing moves the bottom rail's handle toward the end edge, which
/// lowers its position.
pub(super) fn key_target(rail: Rail, delta: f32, positions: &RailPositions, min_gap: f32) -> f32 {
    let raw = match rail {
        Rail::Top => positions.top + delta,
        Rail::Bottom => positions.bottom - delta,
    };
    clamp_to_range(raw, POSITION_MIN, rail_limit(rail, positions, min_gap))
}

/// Integer value sent on commit.
pub(super) fn commit_value(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    clamp_to_range(value, POSITION_MIN, POSITION_MAX).round() as u8
}
