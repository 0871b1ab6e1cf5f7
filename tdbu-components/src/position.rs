//! Rail position resolution and cover status classification.
//!
//! Everything here is a pure function of the two entity snapshots. Missing
//! snapshots and unreadable attributes never fail; they resolve to an
//! indeterminate position or a disabled pair instead.

use std::fmt;

use tdbu_ui::{
    EntitySnapshot, EntityStore, STATE_CLOSED, STATE_OPEN, STATE_UNAVAILABLE, STATE_UNKNOWN,
    entity_state,
};

/// Lowest position on the 0-100 scale.
pub const POSITION_MIN: f32 = 0.0;
/// Highest position on the 0-100 scale.
pub const POSITION_MAX: f32 = 100.0;

/// Decides which entity states make the pair unusable.
///
/// A missing snapshot or the `unavailable` state always disables. Whether
/// `unknown` disables is configurable, because integrations report `unknown`
/// both for "not yet polled" and for covers that are reachable but never
/// report a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnavailablePolicy {
    /// Treat the `unknown` state like `unavailable`.
    pub unknown_disables: bool,
}

impl Default for UnavailablePolicy {
    fn default() -> Self {
        Self {
            unknown_disables: true,
        }
    }
}

impl UnavailablePolicy {
    /// Returns true when `snapshot` alone makes the pair unusable.
    pub fn is_unavailable(&self, snapshot: Option<&EntitySnapshot>) -> bool {
        match snapshot {
            None => true,
            Some(s) => {
                s.is_state(STATE_UNAVAILABLE) || (self.unknown_disables && s.is_state(STATE_UNKNOWN))
            }
        }
    }
}

/// Resolves a rail's position from its snapshot.
///
/// Prefers the `current_position` attribute, then `position`, then maps the
/// `open`/`closed` states to 100/0. Numeric results are clamped to 0-100.
/// Anything else is indeterminate.
pub fn resolve_position(snapshot: Option<&EntitySnapshot>) -> Option<f32> {
    let snapshot = snapshot?;
    let attrs = &snapshot.attributes;
    let raw = attrs
        .current_position
        .filter(|v| v.is_finite())
        .or(attrs.position.filter(|v| v.is_finite()));
    if let Some(raw) = raw {
        return Some(raw.clamp(POSITION_MIN, POSITION_MAX));
    }
    if snapshot.is_state(STATE_OPEN) {
        return Some(POSITION_MAX);
    }
    if snapshot.is_state(STATE_CLOSED) {
        return Some(POSITION_MIN);
    }
    None
}

/// Returns true if either rail is missing or unavailable under `policy`.
pub fn is_disabled(
    top: Option<&EntitySnapshot>,
    bottom: Option<&EntitySnapshot>,
    policy: UnavailablePolicy,
) -> bool {
    policy.is_unavailable(top) || policy.is_unavailable(bottom)
}

/// Summary state of a rail pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoverStatus {
    /// Both rails at 0.
    Closed,
    /// Both rails at 100.
    Open,
    /// Both positions known, anything else.
    Partial,
    /// The pair is disabled.
    Unavailable,
    /// Positions unknown; the raw state string of the first present snapshot.
    Reported(String),
}

impl fmt::Display for CoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverStatus::Closed => f.write_str("Closed"),
            CoverStatus::Open => f.write_str("Open"),
            CoverStatus::Partial => f.write_str("Partial"),
            CoverStatus::Unavailable => f.write_str("Unavailable"),
            CoverStatus::Reported(state) => f.write_str(state),
        }
    }
}

/// Classifies a rail pair.
pub fn classify(
    top: Option<&EntitySnapshot>,
    bottom: Option<&EntitySnapshot>,
    policy: UnavailablePolicy,
) -> CoverStatus {
    if is_disabled(top, bottom, policy) {
        return CoverStatus::Unavailable;
    }

    if let (Some(top_pos), Some(bottom_pos)) = (resolve_position(top), resolve_position(bottom)) {
        if top_pos == POSITION_MIN && bottom_pos == POSITION_MIN {
            return CoverStatus::Closed;
        }
        if top_pos == POSITION_MAX && bottom_pos == POSITION_MAX {
            return CoverStatus::Open;
        }
        return CoverStatus::Partial;
    }

    let raw = top
        .map(|s| s.state.as_str())
        .filter(|s| !s.is_empty())
        .or_else(|| bottom.map(|s| s.state.as_str()))
        .unwrap_or_default();
    CoverStatus::Reported(raw.to_string())
}

/// Returns true when the pair is usable and not fully closed.
pub fn is_active(
    top: Option<&EntitySnapshot>,
    bottom: Option<&EntitySnapshot>,
    policy: UnavailablePolicy,
) -> bool {
    if is_disabled(top, bottom, policy) {
        return false;
    }
    match (resolve_position(top), resolve_position(bottom)) {
        (Some(top_pos), Some(bottom_pos)) => {
            !(top_pos == POSITION_MIN && bottom_pos == POSITION_MIN)
        }
        _ => [top, bottom]
            .into_iter()
            .flatten()
            .any(|s| !s.is_state(STATE_CLOSED)),
    }
}

/// Formats a position as a rounded percentage, `--` when indeterminate.
pub fn format_pct(value: Option<f32>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{}%", v.round() as i32),
        None => "--".to_string(),
    }
}

/// The two snapshots of a rail pair, read from a store together.
#[derive(Debug, Clone, Copy, Default)]
pub struct RailSnapshots<'a> {
    /// Top rail snapshot, if present.
    pub top: Option<&'a EntitySnapshot>,
    /// Bottom rail snapshot, if present.
    pub bottom: Option<&'a EntitySnapshot>,
}

impl<'a> RailSnapshots<'a> {
    /// Reads both rails from `store`.
    pub fn read<S>(store: &'a S, top_entity: &str, bottom_entity: &str) -> Self
    where
        S: EntityStore + ?Sized,
    {
        Self {
            top: entity_state(store, top_entity),
            bottom: entity_state(store, bottom_entity),
        }
    }

    /// Resolved top position.
    pub fn top_position(&self) -> Option<f32> {
        resolve_position(self.top)
    }

    /// Resolved bottom position.
    pub fn bottom_position(&self) -> Option<f32> {
        resolve_position(self.bottom)
    }

    /// See [`is_disabled`].
    pub fn is_disabled(&self, policy: UnavailablePolicy) -> bool {
        is_disabled(self.top, self.bottom, policy)
    }

    /// See [`classify`].
    pub fn classify(&self, policy: UnavailablePolicy) -> CoverStatus {
        classify(self.top, self.bottom, policy)
    }

    /// See [`is_active`].
    pub fn is_active(&self, policy: UnavailablePolicy) -> bool {
        is_active(self.top, self.bottom, policy)
    }

    /// The first present snapshot, top first.
    pub fn primary(&self) -> Option<&'a EntitySnapshot> {
        self.top.or(self.bottom)
    }
}
