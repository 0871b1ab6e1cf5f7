//! tdbu-ui provides the input, geometry and host-boundary primitives shared by
//! the top-down/bottom-up cover controls.
//!
//! # Host boundary
//!
//! Controls built on this crate never render and never own state that lives
//! outside them. The host supplies:
//!
//! - an [`EntityStore`] to read entity snapshots from,
//! - a [`CommandChannel`] to receive [`SetPosition`] commands,
//! - pointer and key events, plus the on-screen track rectangle,
//! - a shared [`PointerCapture`] registry it consults to route move and
//!   release events during a drag.
//!
//! ```
//! use tdbu_ui::{EntitySnapshot, EntityStates, EntityStore};
//!
//! let mut states = EntityStates::new();
//! states.insert(
//!     "cover.top_rail",
//!     EntitySnapshot::new("open").with_current_position(40.0),
//! );
//! assert!(states.entity("cover.top_rail").is_some());
//! assert!(states.entity("cover.bottom_rail").is_none());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod capture;
pub mod cursor;
pub mod entity;
pub mod keyboard_state;
pub mod logging;
pub mod orientation;
pub mod prop;
pub mod px;
pub mod service;

pub use crate::{
    capture::{CaptureGuard, CaptureOwner, PointerCapture},
    cursor::{PointerEvent, PointerEventContent, PressKeyEventType},
    entity::{
        EntityAttributes, EntitySnapshot, EntityStates, EntityStore, STATE_CLOSED, STATE_OPEN,
        STATE_UNAVAILABLE, STATE_UNKNOWN, entity_state,
    },
    keyboard_state::{KeyCode, KeyEvent, KeyEventKind, KeyboardState, Modifiers},
    orientation::Orientation,
    prop::CallbackWith,
    px::{Px, PxPosition, PxRect, PxSize},
    service::{CommandChannel, SetPosition},
};
