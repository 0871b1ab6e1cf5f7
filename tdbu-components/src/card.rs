//! The dashboard card and its details dialog.
//!
//! [`TdbuCard`] shows a title, a status label, optional per-rail percentages
//! and a compact [`DualRailSlider`]. Tapping the card body opens a
//! [`TdbuDialog`] with a large slider or asks the host for its entity view,
//! depending on [`TapAction`].
use tdbu_ui::{
    CommandChannel, EntitySnapshot, EntityStore, KeyEvent, PointerCapture, PointerEvent,
    PointerEventContent, PxRect,
};
use tracing::debug;

use crate::{
    config::{CardConfig, TapAction},
    position::{CoverStatus, RailSnapshots, format_pct},
    slider::{DualRailSlider, DualRailSliderArgs, EventDisposition, Rail, SliderSize},
};

/// Version reported by the card.
pub const CARD_VERSION: &str = "0.2.1";

/// Title used when neither the config nor the entities provide a name.
pub const DEFAULT_NAME: &str = "Top down bottom up blind";

/// Layout height hint, in dashboard rows.
pub const CARD_SIZE: u32 = 2;

/// Host-facing result of tapping the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// The host should show its details view for this entity.
    MoreInfo {
        /// Entity to show.
        entity_id: String,
    },
    /// The details dialog was opened; see [`TdbuCard::dialog`].
    DialogOpened,
}

/// A labeled percentage row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    /// Row label.
    pub label: &'static str,
    /// Formatted position.
    pub value: String,
}

fn friendly(snapshot: Option<&EntitySnapshot>) -> Option<&str> {
    snapshot
        .and_then(|s| s.attributes.friendly_name.as_deref())
        .filter(|name| !name.is_empty())
}

fn display_name(config: &CardConfig, snapshots: &RailSnapshots<'_>) -> String {
    config
        .name
        .as_deref()
        .or_else(|| friendly(snapshots.top))
        .or_else(|| friendly(snapshots.bottom))
        .unwrap_or(DEFAULT_NAME)
        .to_string()
}

fn slider_args(
    config: &CardConfig,
    size: SliderSize,
    on_command: &CommandChannel,
    capture: &PointerCapture,
) -> DualRailSliderArgs {
    DualRailSliderArgs::new(config.top_entity.clone(), config.bottom_entity.clone())
        .step(config.step)
        .min_gap(config.min_gap)
        .size(size)
        .unavailable_policy(config.unavailable_policy())
        .on_commit_shared(on_command.clone())
        .capture(capture.clone())
}

/// The dashboard card.
#[derive(Debug)]
pub struct TdbuCard {
    config: CardConfig,
    on_command: CommandChannel,
    capture: PointerCapture,
    slider: DualRailSlider,
    suppress_tap: bool,
    dialog: Option<TdbuDialog>,
}

impl TdbuCard {
    /// Creates a card. Commands are dropped until a channel is attached.
    pub fn new(config: CardConfig) -> Self {
        let on_command = CommandChannel::noop();
        let capture = PointerCapture::new();
        let slider = DualRailSlider::new(slider_args(
            &config,
            SliderSize::Compact,
            &on_command,
            &capture,
        ));
        Self {
            config,
            on_command,
            capture,
            slider,
            suppress_tap: false,
            dialog: None,
        }
    }

    /// Routes commands from this card and its dialog to `on_command`.
    pub fn with_command_channel(mut self, on_command: impl Into<CommandChannel>) -> Self {
        self.on_command = on_command.into();
        self.rebuild_slider_args();
        self
    }

    /// Registers drags from this card and its dialog in `capture`.
    pub fn with_capture(mut self, capture: PointerCapture) -> Self {
        self.capture = capture;
        self.rebuild_slider_args();
        self
    }

    /// Applies a new configuration. An open dialog is closed.
    pub fn set_config(&mut self, config: CardConfig) {
        self.config = config;
        self.dialog = None;
        self.rebuild_slider_args();
    }

    fn rebuild_slider_args(&mut self) {
        self.slider.set_args(slider_args(
            &self.config,
            SliderSize::Compact,
            &self.on_command,
            &self.capture,
        ));
    }

    /// Current configuration.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// The inline slider.
    pub fn slider(&self) -> &DualRailSlider {
        &self.slider
    }

    /// Layout height hint.
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Title shown in the card header.
    pub fn display_name<S>(&self, store: &S) -> String
    where
        S: EntityStore + ?Sized,
    {
        display_name(&self.config, &self.slider.snapshots(store))
    }

    /// Summary status of the rail pair.
    pub fn status<S>(&self, store: &S) -> CoverStatus
    where
        S: EntityStore + ?Sized,
    {
        self.slider
            .snapshots(store)
            .classify(self.config.unavailable_policy())
    }

    /// Status text shown in the card header.
    pub fn status_label<S>(&self, store: &S) -> String
    where
        S: EntityStore + ?Sized,
    {
        self.status(store).to_string()
    }

    /// Returns true when the pair is usable and not fully closed.
    pub fn is_active<S>(&self, store: &S) -> bool
    where
        S: EntityStore + ?Sized,
    {
        self.slider
            .snapshots(store)
            .is_active(self.config.unavailable_policy())
    }

    /// Returns true when the controls are disabled.
    pub fn is_disabled<S>(&self, store: &S) -> bool
    where
        S: EntityStore + ?Sized,
    {
        self.slider.is_disabled(store)
    }

    /// Per-rail percentages from the store, empty when hidden by config.
    pub fn position_rows<S>(&self, store: &S) -> Vec<PositionRow>
    where
        S: EntityStore + ?Sized,
    {
        if !self.config.show_positions {
            return Vec::new();
        }
        let snapshots = self.slider.snapshots(store);
        vec![
            PositionRow {
                label: "Top",
                value: format_pct(snapshots.top_position()),
            },
            PositionRow {
                label: "Bottom",
                value: format_pct(snapshots.bottom_position()),
            },
        ]
    }

    /// Routes a pointer event landing on the inline track.
    ///
    /// Presses and releases on the track suppress the card tap until
    /// [`TdbuCard::end_frame`].
    pub fn track_pointer_event<S>(
        &mut self,
        store: &S,
        event: &PointerEvent,
        track: PxRect,
    ) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        if !matches!(event.content, PointerEventContent::Moved) {
            self.suppress_tap = true;
        }
        self.slider.handle_pointer_event(store, event, track)
    }

    /// Routes a captured move or release that happened outside the track.
    ///
    /// The event goes to whichever slider holds the capture, inline or
    /// dialog. Without a capture it is ignored.
    pub fn captured_pointer_event<S>(&mut self, store: &S, event: &PointerEvent) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        let owners = self.capture.owners();
        let slider = if owners.contains(&self.slider.owner()) {
            Some(&mut self.slider)
        } else {
            self.dialog
                .as_mut()
                .map(|dialog| &mut dialog.slider)
                .filter(|slider| owners.contains(&slider.owner()))
        };
        let Some(slider) = slider else {
            return EventDisposition::Ignored;
        };
        match event.content {
            PointerEventContent::Moved => slider.pointer_move(store, event.position),
            PointerEventContent::Released(_) => slider.pointer_up(),
            PointerEventContent::Pressed(_) => EventDisposition::Ignored,
        }
    }

    /// Presses a handle on the inline track.
    pub fn track_press_handle<S>(
        &mut self,
        store: &S,
        rail: Rail,
        event: &PointerEvent,
        track: PxRect,
    ) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        self.suppress_tap = true;
        self.slider.press_handle(store, rail, event.position, track)
    }

    /// Key press on an inline handle.
    pub fn track_key_down<S>(&mut self, store: &S, rail: Rail, event: &KeyEvent) -> EventDisposition
    where
        S: EntityStore + ?Sized,
    {
        self.slider.key_down(store, rail, event)
    }

    /// Clears the tap suppression set by track interaction. Hosts call this
    /// once the current event dispatch has finished.
    pub fn end_frame(&mut self) {
        self.suppress_tap = false;
    }

    /// Tap on the card body.
    pub fn tap<S>(&mut self, store: &S) -> Option<CardAction>
    where
        S: EntityStore + ?Sized,
    {
        if self.suppress_tap {
            debug!("card tap suppressed by track interaction");
            return None;
        }
        if self.is_disabled(store) {
            return None;
        }
        match self.config.tap_action {
            TapAction::None => None,
            TapAction::MoreInfo => {
                let entity_id = self.config.more_info_entity().to_string();
                debug!(%entity_id, "card tap: more info");
                Some(CardAction::MoreInfo { entity_id })
            }
            TapAction::Details => {
                debug!("card tap: opening dialog");
                self.dialog = Some(TdbuDialog::new(
                    self.config.clone(),
                    &self.on_command,
                    &self.capture,
                ));
                Some(CardAction::DialogOpened)
            }
        }
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<&TdbuDialog> {
        self.dialog.as_ref()
    }

    /// The open dialog, if any.
    pub fn dialog_mut(&mut self) -> Option<&mut TdbuDialog> {
        self.dialog.as_mut()
    }

    /// Closes the dialog, releasing any drag it holds.
    pub fn close_dialog(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            dialog.close();
        }
    }
}

/// The details dialog with a large slider.
#[derive(Debug)]
pub struct TdbuDialog {
    config: CardConfig,
    slider: DualRailSlider,
}

impl TdbuDialog {
    /// Creates a dialog bound to the card's entities, channel and capture
    /// registry.
    pub fn new(config: CardConfig, on_command: &CommandChannel, capture: &PointerCapture) -> Self {
        let slider = DualRailSlider::new(slider_args(
            &config,
            SliderSize::Large,
            on_command,
            capture,
        ));
        Self { config, slider }
    }

    /// Dialog heading.
    pub fn heading<S>(&self, store: &S) -> String
    where
        S: EntityStore + ?Sized,
    {
        display_name(&self.config, &self.slider.snapshots(store))
    }

    /// The `Top: x%` and `Bottom: y%` lines under the slider.
    pub fn positions_line<S>(&self, store: &S) -> [String; 2]
    where
        S: EntityStore + ?Sized,
    {
        let snapshots = self.slider.snapshots(store);
        [
            format!("Top: {}", format_pct(snapshots.top_position())),
            format!("Bottom: {}", format_pct(snapshots.bottom_position())),
        ]
    }

    /// The large slider.
    pub fn slider(&self) -> &DualRailSlider {
        &self.slider
    }

    /// The large slider, for routing input.
    pub fn slider_mut(&mut self) -> &mut DualRailSlider {
        &mut self.slider
    }

    /// Tears the dialog down. An in-progress drag ends without a commit.
    pub fn close(self) {
        debug!(dragging = self.slider.is_dragging(), "dialog closed");
    }
}
