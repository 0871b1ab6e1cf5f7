//! A dual-rail slider for top-down/bottom-up covers.
//!
//! ## Usage
//!
//! Bind the slider to two cover entities, route pointer and key events into
//! it, and render from [`DualRailSlider::frame`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use parking_lot::Mutex;
//! use tdbu_components::slider::{DualRailSlider, DualRailSliderArgs};
//! use tdbu_ui::{EntitySnapshot, EntityStates, Px, PxPosition, PxRect};
//!
//! let mut states = EntityStates::new();
//! states.insert("cover.top", EntitySnapshot::new("open").with_current_position(20.0));
//! states.insert("cover.bottom", EntitySnapshot::new("open").with_current_position(30.0));
//!
//! let sent = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&sent);
//! let mut slider = DualRailSlider::new(
//!     DualRailSliderArgs::new("cover.top", "cover.bottom")
//!         .on_commit(move |command| sink.lock().push(command)),
//! );
//!
//! let track = PxRect::new(Px(0), Px(0), Px(42), Px(100));
//! slider.pointer_down(&states, PxPosition::new(Px(20), Px(25)), track);
//! slider.pointer_move(&states, PxPosition::new(Px(20), Px(40)));
//! slider.pointer_up();
//!
//! let sent = sent.lock();
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].entity_id, "cover.top");
//! assert_eq!(sent[0].position, 40);
//! ```
use derive_setters::Setters;
use tdbu_ui::{
    CaptureGuard, CaptureOwner, CommandChannel, EntityStore, KeyEvent, Orientation,
    PointerCapture, PointerEvent, PointerEventContent, Px, PxPosition, PxRect, SetPosition,
};
use tracing::{debug, trace};

use crate::position::{RailSnapshots, UnavailablePolicy};

use interaction::{
    commit_value, drag_target, key_delta, key_target, nearest_rail, pointer_percent,
};

pub use layout::{FabricSpan, TrackLayout, coordinate};

mod interaction;
mod layout;

const DEFAULT_STEP: f32 = 1.0;
const DEFAULT_MIN_GAP: f32 = 0.0;

/// One of the two independently driven edges of the covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rail {
    /// The rail that moves down from the top edge.
    Top,
    /// The rail that moves up from the bottom edge.
    Bottom,
}

impl Rail {
    /// The opposite rail.
    pub fn other(self) -> Self {
        match self {
            Rail::Top => Rail::Bottom,
            Rail::Bottom => Rail::Top,
        }
    }

    /// Accessibility label for the rail's handle.
    pub fn label(self) -> &'static str {
        match self {
            Rail::Top => "Top rail",
            Rail::Bottom => "Bottom rail",
        }
    }
}

/// Size variant of the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderSize {
    /// Inline track used on the card.
    #[default]
    Compact,
    /// Tall track used in the details dialog.
    Large,
}

/// Whether an input event was used by the slider.
///
/// Hosts should stop default handling (scrolling, focus moves) for consumed
/// events only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDisposition {
    /// The event changed slider state or issued a command.
    Consumed,
    /// The event was not applicable and should continue to the host.
    Ignored,
}

impl EventDisposition {
    /// Returns true for [`EventDisposition::Consumed`].
    pub fn is_consumed(self) -> bool {
        matches!(self, EventDisposition::Consumed)
    }
}

/// Numeric positions of both rails, indeterminate values already replaced by
/// 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RailPositions {
    /// Top rail position.
    pub top: f32,
    /// Bottom rail position.
    pub bottom: f32,
}

impl RailPositions {
    /// Position of `rail`.
    pub fn position(&self, rail: Rail) -> f32 {
        match rail {
            Rail::Top => self.top,
            Rail::Bottom => self.bottom,
        }
    }

    /// Coordinate of `rail` on the shared axis.
    pub fn coordinate(&self, rail: Rail) -> f32 {
        coordinate(rail, self.position(rail))
    }

    /// Returns true when the rails are ordered and at least `min_gap` apart.
    pub fn satisfies_gap(&self, min_gap: f32) -> bool {
        self.top <= 100.0 - self.bottom - min_gap
    }
}

/// Arguments for [`DualRailSlider`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct DualRailSliderArgs {
    /// Entity driving the top rail.
    #[setters(into)]
    pub top_entity: String,
    /// Entity driving the bottom rail.
    #[setters(into)]
    pub bottom_entity: String,
    /// Keyboard step in position units. Values that are not positive fall back
    /// to 1.
    pub step: f32,
    /// Minimum separation between the rails. Negative values fall back to 0.
    pub min_gap: f32,
    /// Axis the track is laid out along.
    pub orientation: Orientation,
    /// Size variant.
    pub size: SliderSize,
    /// Which entity states disable the slider.
    pub unavailable_policy: UnavailablePolicy,
    /// Receives a command for every commit.
    #[setters(skip)]
    pub on_commit: CommandChannel,
    /// Registry the host consults to route move/release events during a drag.
    ///
    /// Defaults to a registry private to this slider.
    #[setters(skip)]
    pub capture: PointerCapture,
}

impl DualRailSliderArgs {
    /// Arguments bound to two entities, everything else default.
    pub fn new(top_entity: impl Into<String>, bottom_entity: impl Into<String>) -> Self {
        Self {
            top_entity: top_entity.into(),
            bottom_entity: bottom_entity.into(),
            ..Default::default()
        }
    }

    /// Sets the commit handler.
    pub fn on_commit<F>(mut self, on_commit: F) -> Self
    where
        F: Fn(SetPosition) + Send + Sync + 'static,
    {
        self.on_commit = CommandChannel::new(on_commit);
        self
    }

    /// Sets the commit handler using a shared channel.
    pub fn on_commit_shared(mut self, on_commit: impl Into<CommandChannel>) -> Self {
        self.on_commit = on_commit.into();
        self
    }

    /// Sets a shared pointer capture registry.
    pub fn capture(mut self, capture: PointerCapture) -> Self {
        self.capture = capture;
        self
    }

    /// The keyboard step actually used.
    pub fn effective_step(&self) -> f32 {
        if self.step.is_finite() && self.step > 0.0 {
            self.step
        } else {
            DEFAULT_STEP
        }
    }

    /// The minimum gap actually used.
    pub fn effective_min_gap(&self) -> f32 {
        if self.min_gap.is_finite() && self.min_gap >= 0.0 {
            self.min_gap
        } else {
            DEFAULT_MIN_GAP
        }
    }
}

impl Default for DualRailSliderArgs {
    fn default() -> Self {
        Self {
            top_entity: String::new(),
            bottom_entity: String::new(),
            step: DEFAULT_STEP,
            min_gap: DEFAULT_MIN_GAP,
            orientation: Orientation::Vertical,
            size: SliderSize::Compact,
            unavailable_policy: UnavailablePolicy::default(),
            on_commit: CommandChannel::noop(),
            capture: PointerCapture::new(),
        }
    }
}

/// An active drag: the rail being moved, the track bounds captured at press
/// time, and the pointer capture held until release.
#[derive(Debug)]
struct DragSession {
    rail: Rail,
    track: PxRect,
    _capture: CaptureGuard,
}

#[derive(Debug, Default)]
enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Render data for one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleFrame {
    /// Which rail.
    pub rail: Rail,
    /// Position shown to the user and reported as the accessible value.
    pub value_now: f32,
    /// Coordinate on the shared axis.
    pub coordinate: f32,
    /// Pixel offset of the handle center from the track start.
    pub offset: Px,
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderFrame {
    /// Interaction is blocked.
    pub disabled: bool,
    /// Rail currently being dragged.
    pub dragging: Option<Rail>,
    /// Top handle.
    pub top: HandleFrame,
    /// Bottom handle.
    pub bottom: HandleFrame,
    /// Filled region between the handles.
    pub fabric: FabricSpan,
}

impl SliderFrame {
    /// Render data for `rail`.
    pub fn handle(&self, rail: Rail) -> &HandleFrame {
        match rail {
            Rail::Top => &self.top,
            Rail::Bottom => &self.bottom,
        }
    }
}

/// The dual-rail slider state machine.
///
/// Idle until a press lands on the track or a handle; then dragging one rail
/// until the pointer is released. Drafts shadow the store while dragging and
/// are discarded once the drag ends. Dropping the slider mid-drag releases
/// its pointer capture without committing.
#[derive(Debug)]
pub struct DualRailSlider {
    args: DualRailSliderArgs,
    owner: CaptureOwner,
    phase: DragPhase,
    draft_top: Option<f32>,
    draft_bottom: Option<f32>,
}

impl DualRailSlider {
    /// Creates an idle slider.
    pub fn new(args: DualRailSliderArgs) -> Self {
        Self {
            args,
            owner: CaptureOwner::next(),
            phase: DragPhase::Idle,
            draft_top: None,
            draft_bottom: None,
        }
    }

    /// Current arguments.
    pub fn args(&self) -> &DualRailSliderArgs {
        &self.args
    }

    /// Replaces the arguments.
    ///
    /// An active drag keeps its captured track and pointer capture while the
    /// entities stay the same. Rebinding either rail ends the drag without a
    /// commit, so a draft never lands on an entity it was not made for.
    pub fn set_args(&mut self, args: DualRailSliderArgs) {
        let rebound = self.args.top_entity != args.top_entity
            || self.args.bottom_entity != args.bottom_entity;
        if rebound && self.is_dragging() {
            debug!(rail = ?self.dragging_rail(), "entities changed mid-drag, dropping draft");
            self.phase = DragPhase::Idle;
            self.draft_top = None;
            self.draft_bottom = None;
        }
        self.args = args;
    }

    /// Identity used in the pointer capture registry.
    pub fn owner(&self) -> CaptureOwner {
        self.owner
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Rail being dragged, if any.
    pub fn dragging_rail(&self) -> Option<Rail> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session.rail),
            DragPhase::Idle => None,
        }
    }

    /// The draft value of `rail`, if one exists.
    pub fn draft(&self, rail: Rail) -> Option<f32> {
        match rail {
            Rail::Top => self.draft_top,
            Rail::Bottom => self.draft_bottom,
        }
    }

    /// Both rail snapshots from `store`.
    pub fn snapshots<'s, S>(&self, store: &'s S) -> RailSnapshots<'s>
    where
        S: EntityStore + ?Sized,
    {
        RailSnapshots::read(store, &self.args.top_entity, &self.args.bottom_entity)
    }

    /// Returns true when either entity is missing or unavailable.
    pub fn is_disabled<S>(&self, store: &S) -> bool
    where
        S: EntityStore + ?Sized,
    {
        self.snapshots(store)
            .is_disabled(self.args.unavailable_policy)
    }

    /// Position to display for `rail`: the draft if one exists, otherwise the
    /// resolved store value (possibly indeterminate).
    pub fn render_position<S>(&self, store: &S, rail: Rail) -> Option<f32>
    where
        S: EntityStore + ?Sized,
    {
        if let Some(draft) = self.draft(rail) {
            return Some(draft);
        }
        let snapshots = self.snapshots(store);
        match rail {
            Rail::Top => snapshots.top_position(),
            Rail::Bottom => snapshots.bottom_position(),
        }
    }

    /// Positions used for constraint math: drafts first, then store values,
    /// indeterminate as 0.
    pub fn current_positions<S>(&self, store: &S) -> RailPositions
    where
        S: EntityStore + ?Sized,
    {
        RailPositions {
            top: self.render_position(store, Rail::Top).unwrap_or(0.0),
            bottom: self.render_position(store, Rail::Bottom).unwrap_or(0.0),
        }
    }

    /// Track layout for this slider's size and orientation.
    pub fn layout(&self, measured_length: Option<Px>) -> TrackLayout {
        TrackLayout::new(self.args.size, self.args.orientation, measured_length)
    }

    /// Press on the track: drags whichever rail is nearer to the pointer.
    pub fn pointer_down<S>(&mut self, store: &S, point: PxPosition, track: PxRect) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        if self.is_dragging() || self.is_disabled(store) {
            return EventDisposition::Ignored;
        }
        let Some(percent) = pointer_percent(point, &track, self.args.orientation) else {
            return EventDisposition::Ignored;
        };
        let rail = nearest_rail(percent, &self.current_positions(store));
        self.start_drag(store, rail, point, track)
    }

    /// Press directly on a handle: drags that rail.
    pub fn press_handle<S>(
        &mut self,
        store: &S,
        rail: Rail,
        point: PxPosition,
        track: PxRect,
    ) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        if self.is_dragging() || self.is_disabled(store) {
            return EventDisposition::Ignored;
        }
        if pointer_percent(point, &track, self.args.orientation).is_none() {
            return EventDisposition::Ignored;
        }
        self.start_drag(store, rail, point, track)
    }

    fn start_drag<S>(
        &mut self,
        store: &S,
        rail: Rail,
        point: PxPosition,
        track: PxRect,
    ) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        debug!(?rail, ?track, "drag started");
        self.phase = DragPhase::Dragging(DragSession {
            rail,
            track,
            _capture: self.args.capture.acquire(self.owner),
        });
        self.pointer_move(store, point);
        EventDisposition::Consumed
    }

    /// Pointer moved while dragging: updates the dragged rail's draft.
    pub fn pointer_move<S>(&mut self, store: &S, point: PxPosition) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        let DragPhase::Dragging(session) = &self.phase else {
            return EventDisposition::Ignored;
        };
        let (rail, track) = (session.rail, session.track);
        let Some(percent) = pointer_percent(point, &track, self.args.orientation) else {
            return EventDisposition::Ignored;
        };

        let positions = self.current_positions(store);
        let draft = drag_target(rail, percent, &positions, self.args.effective_min_gap());
        trace!(?rail, percent, draft, "drag moved");
        match rail {
            Rail::Top => self.draft_top = Some(draft),
            Rail::Bottom => self.draft_bottom = Some(draft),
        }
        EventDisposition::Consumed
    }

    /// Pointer released anywhere: commits the dragged rail's draft once and
    /// returns to idle.
    pub fn pointer_up(&mut self) -> EventDisposition {
        let DragPhase::Dragging(session) = std::mem::take(&mut self.phase) else {
            return EventDisposition::Ignored;
        };
        let rail = session.rail;
        drop(session);

        let draft = self.draft(rail);
        self.draft_top = None;
        self.draft_bottom = None;

        if let Some(value) = draft {
            self.commit(rail, value);
        }
        debug!(?rail, committed = draft.is_some(), "drag ended");
        EventDisposition::Consumed
    }

    /// Routes a pointer event. `track` is only read for presses.
    pub fn handle_pointer_event<S>(
        &mut self,
        store: &S,
        event: &PointerEvent,
        track: PxRect,
    ) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        match event.content {
            PointerEventContent::Pressed(_) => self.pointer_down(store, event.position, track),
            PointerEventContent::Moved => self.pointer_move(store, event.position),
            PointerEventContent::Released(_) => self.pointer_up(),
        }
    }

    /// Key pressed on `rail`'s handle. Arrow keys commit a step immediately.
    pub fn key_down<S>(&mut self, store: &S, rail: Rail, event: &KeyEvent) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        if self.is_dragging() || self.is_disabled(store) {
            return EventDisposition::Ignored;
        }
        let Some(delta) = key_delta(event, self.args.effective_step()) else {
            return EventDisposition::Ignored;
        };

        let positions = self.current_positions(store);
        let next = key_target(rail, delta, &positions, self.args.effective_min_gap());
        debug!(?rail, delta, next, "keyboard step");
        self.commit(rail, next);
        EventDisposition::Consumed
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn commit(&self, rail: Rail, value: f32) {
        let entity_id = match rail {
            Rail::Top => &self.args.top_entity,
            Rail::Bottom => &self.args.bottom_entity,
        };
        let command = SetPosition::new(entity_id.clone(), commit_value(value));
        debug!(entity_id = %command.entity_id, position = command.position, "set position");
        self.args.on_commit.call(command);
    }

    /// Projects the current state onto `layout`.
    pub fn frame<S>(&self, store: &S, layout: &TrackLayout) -> SliderFrame
    where
        S: EntityStore + ?Sized,
    {
        let positions = self.current_positions(store);
        let handle = |rail: Rail| {
            let coordinate = positions.coordinate(rail);
            HandleFrame {
                rail,
                value_now: positions.position(rail),
                coordinate,
                offset: layout.handle_offset(coordinate),
            }
        };
        let top = handle(Rail::Top);
        let bottom = handle(Rail::Bottom);

        SliderFrame {
            disabled: self.is_disabled(store),
            dragging: self.dragging_rail(),
            top,
            bottom,
            fabric: layout.fabric_span(top.coordinate, bottom.coordinate),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tdbu_ui::{EntitySnapshot, EntityStates, KeyCode, Modifiers};

    use super::*;

    const TOP: &str = "cover.top_rail";
    const BOTTOM: &str = "cover.bottom_rail";

    fn states(top: f32, bottom: f32) -> EntityStates {
        let mut states = EntityStates::new();
        states.insert(TOP, EntitySnapshot::new("open").with_current_position(top));
        states.insert(BOTTOM, EntitySnapshot::new("open").with_current_position(bottom));
        states
    }

    fn recording_slider(args: DualRailSliderArgs) -> (DualRailSlider, Arc<Mutex<Vec<SetPosition>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sent);
        let slider = DualRailSlider::new(args.on_commit(move |command| sink.lock().push(command)));
        (slider, sent)
    }

    fn track() -> PxRect {
        PxRect::new(Px(0), Px(0), Px(42), Px(100))
    }

    fn at_y(y: i32) -> PxPosition {
        PxPosition::new(Px(21), Px(y))
    }

    #[test]
    fn press_picks_nearest_rail_and_drafts_immediately() {
        let store = states(20.0, 10.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        assert!(slider.pointer_down(&store, at_y(30), track()).is_consumed());
        assert_eq!(slider.dragging_rail(), Some(Rail::Top));
        assert_eq!(slider.draft(Rail::Top), Some(30.0));
        assert_eq!(slider.draft(Rail::Bottom), None);
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn press_near_bottom_drags_bottom() {
        let store = states(20.0, 30.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.pointer_down(&store, at_y(75), track());
        assert_eq!(slider.dragging_rail(), Some(Rail::Bottom));
        assert_eq!(slider.draft(Rail::Bottom), Some(25.0));

        slider.pointer_move(&store, at_y(60));
        slider.pointer_up();
        assert_eq!(*sent.lock(), vec![SetPosition::new(BOTTOM, 40)]);
    }

    #[test]
    fn full_drag_commits_once_with_rounded_last_draft() {
        let store = states(10.0, 10.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        let tall = PxRect::new(Px(0), Px(0), Px(42), Px(1000));

        slider.pointer_down(&store, PxPosition::new(Px(5), Px(100)), tall);
        slider.pointer_move(&store, PxPosition::new(Px(5), Px(200)));
        slider.pointer_move(&store, PxPosition::new(Px(5), Px(425)));
        assert!(slider.pointer_up().is_consumed());

        assert_eq!(*sent.lock(), vec![SetPosition::new(TOP, 43)]);
        assert!(!slider.is_dragging());
        assert_eq!(slider.pointer_up(), EventDisposition::Ignored);
        assert_eq!(sent.lock().len(), 1);
    }

    #[test]
    fn drafts_clear_after_release() {
        let store = states(20.0, 10.0);
        let (mut slider, _sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.pointer_down(&store, at_y(25), track());
        slider.pointer_move(&store, at_y(55));
        assert_eq!(slider.render_position(&store, Rail::Top), Some(55.0));
        slider.pointer_up();

        assert_eq!(slider.draft(Rail::Top), None);
        assert_eq!(slider.render_position(&store, Rail::Top), Some(20.0));
    }

    #[test]
    fn drag_is_clamped_against_other_rail_and_gap() {
        let store = states(50.0, 40.0);
        let (mut slider, sent) =
            recording_slider(DualRailSliderArgs::new(TOP, BOTTOM).min_gap(10.0));

        slider.pointer_down(&store, at_y(45), track());
        assert_eq!(slider.dragging_rail(), Some(Rail::Top));
        slider.pointer_move(&store, at_y(95));
        assert_eq!(slider.draft(Rail::Top), Some(50.0));
        slider.pointer_up();
        assert_eq!(*sent.lock(), vec![SetPosition::new(TOP, 50)]);
    }

    #[test]
    fn track_is_fixed_for_the_whole_drag() {
        let store = states(0.0, 0.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.pointer_down(&store, at_y(10), track());
        // A second press with another rect is ignored, the drag keeps its track.
        let moved_track = PxRect::new(Px(0), Px(500), Px(42), Px(100));
        assert_eq!(
            slider.pointer_down(&store, at_y(510), moved_track),
            EventDisposition::Ignored
        );
        slider.pointer_move(&store, at_y(60));
        assert_eq!(slider.draft(Rail::Top), Some(60.0));
        slider.pointer_up();
        assert_eq!(sent.lock().len(), 1);
    }

    #[test]
    fn horizontal_orientation_reads_x() {
        let store = states(0.0, 0.0);
        let (mut slider, _sent) = recording_slider(
            DualRailSliderArgs::new(TOP, BOTTOM).orientation(Orientation::Horizontal),
        );
        let wide = PxRect::new(Px(100), Px(0), Px(200), Px(42));

        slider.pointer_down(&store, PxPosition::new(Px(150), Px(999)), wide);
        assert_eq!(slider.draft(Rail::Top), Some(25.0));
    }

    #[test]
    fn drag_continues_outside_track() {
        let store = states(0.0, 0.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.pointer_down(&store, at_y(5), track());
        slider.pointer_move(&store, PxPosition::new(Px(-300), Px(-50)));
        assert_eq!(slider.draft(Rail::Top), Some(0.0));
        slider.pointer_move(&store, PxPosition::new(Px(900), Px(4000)));
        assert_eq!(slider.draft(Rail::Top), Some(100.0));
        slider.pointer_up();
        assert_eq!(*sent.lock(), vec![SetPosition::new(TOP, 100)]);
    }

    #[test]
    fn capture_is_held_only_while_dragging() {
        let store = states(20.0, 20.0);
        let capture = PointerCapture::new();
        let (mut slider, _sent) =
            recording_slider(DualRailSliderArgs::new(TOP, BOTTOM).capture(capture.clone()));

        assert!(capture.is_empty());
        slider.pointer_down(&store, at_y(20), track());
        assert!(capture.is_captured_by(slider.owner()));
        slider.pointer_up();
        assert!(capture.is_empty());
    }

    #[test]
    fn teardown_mid_drag_releases_capture_without_commit() {
        let store = states(20.0, 20.0);
        let capture = PointerCapture::new();
        let (mut slider, sent) =
            recording_slider(DualRailSliderArgs::new(TOP, BOTTOM).capture(capture.clone()));

        slider.pointer_down(&store, at_y(20), track());
        slider.pointer_move(&store, at_y(40));
        assert_eq!(capture.len(), 1);
        drop(slider);

        assert!(capture.is_empty());
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn rebinding_entities_mid_drag_drops_the_draft() {
        let store = states(20.0, 20.0);
        let capture = PointerCapture::new();
        let (mut slider, sent) =
            recording_slider(DualRailSliderArgs::new(TOP, BOTTOM).capture(capture.clone()));

        slider.pointer_down(&store, at_y(20), track());
        slider.pointer_move(&store, at_y(40));
        let rebound = slider.args().clone().top_entity("cover.other_top");
        slider.set_args(rebound);

        assert!(!slider.is_dragging());
        assert_eq!(slider.draft(Rail::Top), None);
        assert!(capture.is_empty());
        assert_eq!(slider.pointer_up(), EventDisposition::Ignored);
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn same_entities_keep_the_drag_alive() {
        let store = states(20.0, 20.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.pointer_down(&store, at_y(20), track());
        slider.pointer_move(&store, at_y(40));
        let restepped = slider.args().clone().step(5.0);
        slider.set_args(restepped);

        assert!(slider.is_dragging());
        slider.pointer_up();
        assert_eq!(*sent.lock(), vec![SetPosition::new(TOP, 40)]);
    }

    #[test]
    fn handle_press_skips_nearest_pick() {
        let store = states(10.0, 10.0);
        let (mut slider, _sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.press_handle(&store, Rail::Bottom, at_y(15), track());
        assert_eq!(slider.dragging_rail(), Some(Rail::Bottom));
        // pointer at 15% puts the bottom rail at 85, under its limit of 90
        assert_eq!(slider.draft(Rail::Bottom), Some(85.0));
    }

    #[test]
    fn pointer_events_route_through_one_entry_point() {
        let store = states(20.0, 20.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        slider.handle_pointer_event(&store, &PointerEvent::pressed(at_y(22)), track());
        slider.handle_pointer_event(&store, &PointerEvent::moved(at_y(33)), PxRect::ZERO);
        slider.handle_pointer_event(&store, &PointerEvent::released(at_y(33)), PxRect::ZERO);
        assert_eq!(*sent.lock(), vec![SetPosition::new(TOP, 33)]);
    }

    #[test]
    fn empty_track_is_ignored() {
        let store = states(20.0, 20.0);
        let (mut slider, _sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        let flat = PxRect::new(Px(0), Px(0), Px(42), Px(0));

        assert_eq!(slider.pointer_down(&store, at_y(0), flat), EventDisposition::Ignored);
        assert_eq!(
            slider.press_handle(&store, Rail::Top, at_y(0), flat),
            EventDisposition::Ignored
        );
        assert!(!slider.is_dragging());
    }

    #[test]
    fn keyboard_steps_commit_immediately() {
        let store = states(50.0, 30.0);
        let (mut slider, sent) =
            recording_slider(DualRailSliderArgs::new(TOP, BOTTOM).step(2.0).min_gap(5.0));

        let down = KeyEvent::press(KeyCode::ArrowDown);
        assert!(slider.key_down(&store, Rail::Top, &down).is_consumed());
        slider.key_down(&store, Rail::Top, &down.with_modifiers(Modifiers::SHIFT));
        slider.key_down(&store, Rail::Bottom, &KeyEvent::press(KeyCode::ArrowUp));

        assert_eq!(
            *sent.lock(),
            vec![
                SetPosition::new(TOP, 52),
                SetPosition::new(TOP, 60),
                SetPosition::new(BOTTOM, 32),
            ]
        );
    }

    #[test]
    fn non_arrow_keys_are_not_consumed() {
        let store = states(50.0, 30.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        assert_eq!(
            slider.key_down(&store, Rail::Top, &KeyEvent::press(KeyCode::Tab)),
            EventDisposition::Ignored
        );
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn keyboard_is_ignored_while_dragging() {
        let store = states(50.0, 30.0);
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        slider.pointer_down(&store, at_y(50), track());
        assert_eq!(
            slider.key_down(&store, Rail::Bottom, &KeyEvent::press(KeyCode::ArrowUp)),
            EventDisposition::Ignored
        );
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn rail_positions_share_the_axis() {
        let positions = RailPositions {
            top: 30.0,
            bottom: 60.0,
        };
        assert_eq!(positions.coordinate(Rail::Bottom), 40.0);
        assert!(positions.satisfies_gap(10.0));
        assert!(!positions.satisfies_gap(10.5));
        assert_eq!(Rail::Top.other(), Rail::Bottom);
        assert_eq!(Rail::Bottom.label(), "Bottom rail");
    }

    #[test]
    fn invalid_step_and_gap_fall_back() {
        let args = DualRailSliderArgs::new(TOP, BOTTOM).step(0.0).min_gap(-4.0);
        assert_eq!(args.effective_step(), 1.0);
        assert_eq!(args.effective_min_gap(), 0.0);
        let args = args.step(f32::NAN);
        assert_eq!(args.effective_step(), 1.0);
    }

    #[test]
    fn disabled_slider_ignores_everything() {
        let mut store = states(20.0, 20.0);
        store.insert(BOTTOM, EntitySnapshot::new("unavailable"));
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));

        assert_eq!(slider.pointer_down(&store, at_y(20), track()), EventDisposition::Ignored);
        assert_eq!(
            slider.key_down(&store, Rail::Top, &KeyEvent::press(KeyCode::ArrowDown)),
            EventDisposition::Ignored
        );
        assert_eq!(slider.pointer_up(), EventDisposition::Ignored);
        assert_eq!(slider.draft(Rail::Top), None);
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn frame_projects_drafts_and_store_values() {
        let store = states(20.0, 30.0);
        let (mut slider, _sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        let layout = slider.layout(None);

        let frame = slider.frame(&store, &layout);
        assert!(!frame.disabled);
        assert_eq!(frame.dragging, None);
        assert_eq!(frame.top.value_now, 20.0);
        assert_eq!(frame.bottom.value_now, 30.0);
        assert_eq!(frame.bottom.coordinate, 70.0);
        assert_eq!(frame.top.offset, layout.handle_offset(20.0));
        assert!(frame.fabric.start < frame.top.offset);
        assert!(frame.fabric.end > frame.bottom.offset);

        slider.pointer_down(&store, at_y(10), track());
        let dragging = slider.frame(&store, &layout);
        assert_eq!(dragging.dragging, Some(Rail::Top));
        assert_eq!(dragging.handle(Rail::Top).value_now, 10.0);
    }

    #[test]
    fn indeterminate_positions_render_as_zero() {
        let mut store = EntityStates::new();
        store.insert(TOP, EntitySnapshot::new("opening"));
        store.insert(BOTTOM, EntitySnapshot::new("stopped"));
        let slider = DualRailSlider::new(DualRailSliderArgs::new(TOP, BOTTOM));

        assert_eq!(slider.render_position(&store, Rail::Top), None);
        let frame = slider.frame(&store, &slider.layout(None));
        assert_eq!(frame.top.value_now, 0.0);
        assert_eq!(frame.bottom.value_now, 0.0);
        assert_eq!(frame.bottom.coordinate, 100.0);
    }

    #[test]
    fn missing_store_disables() {
        let missing: Option<EntityStates> = None;
        let (mut slider, sent) = recording_slider(DualRailSliderArgs::new(TOP, BOTTOM));
        assert!(slider.is_disabled(&missing));
        assert_eq!(
            slider.pointer_down(&missing, at_y(10), track()),
            EventDisposition::Ignored
        );
        assert!(sent.lock().is_empty());
    }
}
