//! # Keyboard State Management
//!
//! Key events, modifier tracking and a bounded event queue for hosts that
//! batch input between frames.

use std::collections::VecDeque;

use bitflags::bitflags;

/// Maximum number of keyboard events to keep in the queue.
///
/// When the queue exceeds this size the oldest events are dropped, so a
/// stalled frame cannot grow the queue without bound.
const KEEP_EVENTS_COUNT: usize = 10;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

/// Key codes the controls care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow key.
    ArrowUp,
    /// Down arrow key.
    ArrowDown,
    /// Left arrow key.
    ArrowLeft,
    /// Right arrow key.
    ArrowRight,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Any character key.
    Char(char),
}

/// Whether the key went down, is repeating, or was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed.
    #[default]
    Press,
    /// Key is held and auto-repeating.
    Repeat,
    /// Key was released.
    Release,
}

/// A keyboard event aimed at the focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key.
    pub code: KeyCode,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Press, repeat or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Returns the event with `modifiers` added.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Returns the event with its kind replaced.
    #[must_use]
    pub fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Press and repeat events move things; release events do not.
    pub fn is_down(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Manages the event queue and modifier state for keyboard input.
#[derive(Default, Debug)]
pub struct KeyboardState {
    events: VecDeque<KeyEvent>,
    modifiers: Modifiers,
}

impl KeyboardState {
    /// Adds a new keyboard event to the end of the queue.
    ///
    /// The event inherits the currently held modifiers. If the queue grows past
    /// [`KEEP_EVENTS_COUNT`] the oldest event is dropped.
    pub fn push_event(&mut self, event: KeyEvent) {
        self.events.push_back(event.with_modifiers(self.modifiers));
        if self.events.len() > KEEP_EVENTS_COUNT {
            self.events.pop_front();
        }
    }

    /// Removes and returns all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<KeyEvent> {
        self.events.drain(..).collect()
    }

    /// Updates the held modifiers.
    pub fn update_modifiers(&mut self, new_state: Modifiers) {
        self.modifiers = new_state;
    }

    /// Returns the held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}
