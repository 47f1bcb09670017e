#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. `Modifiers` use bitflags for easy combination.
//!
//! [`Event::Tap`] is the automation-driver surface: an external driver
//! addresses an identifiable control by its id string, the way an
//! end-to-end harness taps a test-identified element. Controls never need
//! to be visible to be tappable.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// An identifiable control was tapped, addressed by control id.
    Tap(String),

    /// The list viewport scrolled by a number of rows (positive = down).
    Scroll {
        /// Signed row delta.
        delta: i32,
    },

    /// The render surface was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// A tick event from the runtime.
    Tick,
}

impl Event {
    /// Convenience constructor for a character key press.
    #[must_use]
    pub fn key(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    /// Convenience constructor for a tap on a control id.
    #[must_use]
    pub fn tap(control: impl Into<String>) -> Self {
        Self::Tap(control.into())
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_char_check() {
        let ev = KeyEvent::new(KeyCode::Char('f'));
        assert!(ev.is_char('f'));
        assert!(!ev.is_char('g'));
        assert!(!ev.ctrl());
    }

    #[test]
    fn modifiers_combine() {
        let ev = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(ev.ctrl());
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn tap_constructor() {
        assert_eq!(Event::tap("push-self-appear"), Event::Tap("push-self-appear".to_owned()));
    }
}
