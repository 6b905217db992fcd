use std::collections::HashSet;

use super::{InputEvent, InputFrame, Key, KeyState};

/// Held keys and focus for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Updates held state and records transitions into `frame`.
    ///
    /// Auto-repeat presses do not count as new presses.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                }
            }
            InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                if self.keys_down.insert(key) {
                    frame.keys_pressed.insert(key);
                }
            }
            InputEvent::Key { key, state: KeyState::Released, .. } => {
                if self.keys_down.remove(&key) {
                    frame.keys_released.insert(key);
                }
            }
        }
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
