//! Pointer events delivered by the host.
//!
//! The host translates mouse, pen and primary-touch input into
//! [`PointerEvent`]s. Press events are routed to the control under the
//! pointer; move and release events are routed to every owner registered in
//! [`PointerCapture`](crate::capture::PointerCapture), even when the pointer has
//! left the control's bounds.

use crate::PxPosition;

/// A single pointer event with the viewport position it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer position in viewport physical pixels.
    pub position: PxPosition,
    /// What happened.
    pub content: PointerEventContent,
}

/// The kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventContent {
    /// A button or touch point went down.
    Pressed(PressKeyEventType),
    /// The pointer moved.
    Moved,
    /// A button or touch point was released.
    Released(PressKeyEventType),
}

/// Which button or touch produced a press/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PressKeyEventType {
    /// The primary mouse button or primary touch.
    #[default]
    Left,
    /// The secondary mouse button.
    Right,
    /// The middle mouse button.
    Middle,
}

impl PointerEvent {
    /// A primary-button press at `position`.
    pub fn pressed(position: PxPosition) -> Self {
        Self {
            position,
            content: PointerEventContent::Pressed(PressKeyEventType::Left),
        }
    }

    /// A move to `position`.
    pub fn moved(position: PxPosition) -> Self {
        Self {
            position,
            content: PointerEventContent::Moved,
        }
    }

    /// A primary-button release at `position`.
    pub fn released(position: PxPosition) -> Self {
        Self {
            position,
            content: PointerEventContent::Released(PressKeyEventType::Left),
        }
    }

    /// Returns true for move and release events, the ones delivered through
    /// pointer capture.
    pub fn is_captured_kind(&self) -> bool {
        !matches!(self.content, PointerEventContent::Pressed(_))
    }
}
