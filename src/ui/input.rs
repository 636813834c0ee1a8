/// Input state tracker.
///
/// Drains all pending terminal events once per frame and exposes them as
/// edge-triggered presses, in arrival order. Snake has no held-key
/// semantics: every direction change, menu action, and typed name
/// character is a discrete press.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};

pub struct InputState {
    /// Press/Repeat key events collected this frame, in arrival order.
    presses: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { presses: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before simulation and meta handling.
    pub fn drain_events(&mut self) {
        self.presses.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    self.presses.push(key);
                }
                _ => {}
            }
        }
    }

    /// All presses this frame, in order. Callers that care which press
    /// came last (direction changes) iterate this directly.
    pub fn presses(&self) -> &[KeyEvent] {
        &self.presses
    }

    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.presses.iter().any(|k| k.code == code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// Printable characters typed this frame (no control modifier).
    /// Used by the title-screen name field.
    pub fn typed_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.presses.iter().filter_map(|k| {
            if k.modifiers.contains(KeyModifiers::CONTROL) {
                return None;
            }
            match k.code {
                KeyCode::Char(c) => Some(c),
                _ => None,
            }
        })
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.presses.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
        })
    }
}
