//! Headless walkthrough of the card: a scripted host feeds pointer and key
//! events and applies the resulting commands to an in-memory entity store.
//!
//! Run with `RUST_LOG=debug` to see the slider's own events.

use std::sync::Arc;

use parking_lot::Mutex;
use tdbu_components::{CARD_VERSION, CardAction, CardConfig, Rail, TdbuCard, config::stub_config};
use tdbu_ui::{
    EntityStates, KeyCode, KeyEvent, KeyboardState, Modifiers, PointerCapture, PointerEvent, Px,
    PxPosition, PxRect, SetPosition, logging::init_tracing,
};
use tracing::{info, warn};

const STATES_JSON: &str = r#"{
    "cover.bedroom_top": {
        "state": "open",
        "attributes": { "current_position": 20, "friendly_name": "Bedroom blind" },
        "last_changed": "2026-10-18T07:30:00+00:00"
    },
    "cover.bedroom_bottom": {
        "state": "open",
        "attributes": { "current_position": 35, "position": "n/a" },
        "last_changed": "2026-10-18T07:30:02+00:00"
    }
}"#;

const CONFIG_JSON: &str = r#"{
    "type": "custom:ha-tdbu-widget",
    "top_entity": "cover.bedroom_top",
    "bottom_entity": "cover.bedroom_bottom",
    "step": 2,
    "min_gap": 5
}"#;

/// Applies queued commands the way a cover integration would: the reported
/// position jumps straight to the target.
fn apply_commands(states: &mut EntityStates, queue: &Mutex<Vec<SetPosition>>) {
    for command in queue.lock().drain(..) {
        info!(
            domain = SetPosition::DOMAIN,
            service = SetPosition::SERVICE,
            data = %command.service_data(),
            "service call"
        );
        match states.get_mut(&command.entity_id) {
            Some(snapshot) => {
                snapshot.attributes.current_position = Some(f32::from(command.position));
            }
            None => warn!(entity_id = %command.entity_id, "command for unknown entity"),
        }
    }
}

fn log_card(card: &TdbuCard, states: &EntityStates) {
    let rows = card
        .position_rows(states)
        .into_iter()
        .map(|row| format!("{} {}", row.label, row.value))
        .collect::<Vec<_>>()
        .join(", ");
    info!(
        name = %card.display_name(states),
        status = %card.status_label(states),
        rows = %rows,
        "card"
    );
}

fn main() {
    init_tracing();
    info!(version = CARD_VERSION, stub = %stub_config(), "tdbu card demo");

    let mut states = match EntityStates::from_json_str(STATES_JSON) {
        Ok(states) => states,
        Err(err) => {
            warn!(%err, "invalid entity states");
            return;
        }
    };
    let config = match CardConfig::from_json_str(CONFIG_JSON) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "invalid card config");
            return;
        }
    };

    let queue = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&queue);
    let capture = PointerCapture::new();
    let mut card = TdbuCard::new(config)
        .with_command_channel(move |command| sink.lock().push(command))
        .with_capture(capture.clone());
    log_card(&card, &states);

    // Drag the top rail from 20% to 30%, finishing the move above the track.
    let track = PxRect::new(Px(16), Px(80), Px(42), Px(96));
    let point = |percent: i32| PxPosition::new(Px(30), Px(80 + 96 * percent / 100));
    card.track_pointer_event(&states, &PointerEvent::pressed(point(20)), track);
    card.captured_pointer_event(&states, &PointerEvent::moved(point(30)));
    info!(owners = ?capture.owners(), "pointer captured");
    card.captured_pointer_event(&states, &PointerEvent::released(point(30)));
    info!(captured = !capture.is_empty(), "pointer released");
    card.end_frame();
    apply_commands(&mut states, &queue);
    log_card(&card, &states);

    // Keyboard: nudge the bottom rail, then a shifted step on the top rail.
    let mut keyboard = KeyboardState::default();
    keyboard.push_event(KeyEvent::press(KeyCode::ArrowUp));
    keyboard.update_modifiers(Modifiers::SHIFT);
    keyboard.push_event(KeyEvent::press(KeyCode::ArrowDown));
    for (rail, event) in [Rail::Bottom, Rail::Top].into_iter().zip(keyboard.take_events()) {
        card.track_key_down(&states, rail, &event);
        apply_commands(&mut states, &queue);
    }
    log_card(&card, &states);

    // Open the dialog and drag the bottom rail there, releasing off the track.
    if card.tap(&states) == Some(CardAction::DialogOpened) {
        let large = PxRect::new(Px(0), Px(0), Px(130), Px(320));
        if let Some(dialog) = card.dialog_mut() {
            dialog
                .slider_mut()
                .pointer_down(&states, PxPosition::new(Px(65), Px(240)), large);
        }
        let off_track = PxPosition::new(Px(200), Px(256));
        card.captured_pointer_event(&states, &PointerEvent::moved(off_track));
        if let Some(dialog) = card.dialog() {
            let slider = dialog.slider();
            let frame = slider.frame(&states, &slider.layout(Some(large.height)));
            info!(?frame, "dialog frame mid-drag");
        }
        card.captured_pointer_event(&states, &PointerEvent::released(off_track));
        apply_commands(&mut states, &queue);

        if let Some(dialog) = card.dialog() {
            let [top, bottom] = dialog.positions_line(&states);
            info!(heading = %dialog.heading(&states), %top, %bottom, "dialog");
        }
    }
    card.close_dialog();
    log_card(&card, &states);
}
